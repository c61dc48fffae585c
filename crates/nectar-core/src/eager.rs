//! Eager-load collaborator interface
//!
//! The engine stays agnostic to any data-access technology. When a resource
//! carries a loader, the engine hands it the batch of requested relations
//! that are still absent from the domain object, before any resolver runs.
//! Resources without a loader skip the step entirely; that is not an error.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Adapter that materializes named relations onto a domain object.
///
/// Implemented by the data layer (an ORM model, a repository, a cache).
/// The engine filters the batch before calling: only relations the adapter
/// declares loadable via [`EagerLoad::can_load`] and that are absent from
/// the object are passed to [`EagerLoad::load`].
#[async_trait]
pub trait EagerLoad: Send + Sync {
    /// Whether this adapter knows how to load `relation`.
    fn can_load(&self, relation: &str) -> bool;

    /// Materialize the given relations onto `data`.
    ///
    /// Must be a no-op for any relation already present. Inserting JSON
    /// `null` marks a relation as known-empty; the engine treats it as
    /// intentionally absent and never asks for it again. A failure here
    /// aborts the whole transformation.
    async fn load(&self, data: &mut Value, relations: &[String]) -> Result<()>;
}
