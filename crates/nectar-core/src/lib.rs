//! Nectar Core Library
//!
//! This crate provides the core functionality for Nectar:
//! - Transformer contract for mapping domain data to API output
//! - Resource wrappers (item, collection, explicit null)
//! - Include-request matching over dotted paths
//! - Scope chaining and the recursive resolution engine
//! - Eager-load collaborator interface for external data layers
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Resource   │────▶│    Scope    │────▶│    JSON     │
//! │ + Transform │     │   Engine    │     │   Output    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                           │ includes
//!                           ▼
//!                     child Scopes (recursive)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use nectar_core::{item, Transform};
//!
//! let json = item(&book, Arc::new(BookTransformer), &["author"], ()).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod eager;
pub mod error;
pub mod requests;
pub mod resource;
pub mod scope;
pub mod transformer;

pub use eager::EagerLoad;
pub use error::{Error, Result};
pub use requests::RequestedPaths;
pub use resource::{Included, Resource};
pub use scope::{DEFAULT_MAX_DEPTH, Scope, collection, item};
pub use transformer::{Fields, Transform, relation_key, resolver_key};
