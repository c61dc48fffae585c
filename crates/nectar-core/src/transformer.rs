//! Transformer contract
//!
//! A transformer is the policy for one domain concept: a pure mapping from a
//! domain object to its base output fields, the set of relations it is
//! willing to expand, and one resolver per relation. Transformers are
//! stateless and long-lived; one instance is reused across transformations.
//!
//! # Example
//!
//! ```rust,ignore
//! struct BookTransformer;
//!
//! #[async_trait]
//! impl Transform for BookTransformer {
//!     fn name(&self) -> &str {
//!         "book"
//!     }
//!
//!     fn available_include(&self) -> &[&str] {
//!         &["author"]
//!     }
//!
//!     async fn transform(&self, data: &Value, _ctx: &()) -> Result<Fields> {
//!         let mut fields = Fields::new();
//!         fields.insert("id".into(), data["id"].clone());
//!         fields.insert("title".into(), data["title"].clone());
//!         Ok(fields)
//!     }
//!
//!     async fn include(&self, relation: &str, data: &Value, _ctx: &()) -> Result<Included> {
//!         match relation {
//!             "author" => Ok(Resource::item(data["author"].clone(), Arc::new(AuthorTransformer)).into()),
//!             other => Err(self.missing_resolver(other)),
//!         }
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::resource::Included;

/// Output mapping produced by [`Transform::transform`].
///
/// Insertion-ordered: the crate enables serde_json's `preserve_order`
/// feature so output key order is deterministic.
pub type Fields = Map<String, Value>;

/// Transformation policy for one domain concept.
///
/// `C` is the shared request context type, passed read-only to every
/// transform and resolver. Use the default `()` when no context is needed.
#[async_trait]
pub trait Transform<C = ()>: Send + Sync
where
    C: Send + Sync,
{
    /// Diagnostic name used in configuration errors.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Relations that may be expanded when their fully-qualified path is
    /// requested, in declared order.
    fn available_include(&self) -> &[&str] {
        &[]
    }

    /// Relations that are always expanded, requested or not.
    fn default_include(&self) -> &[&str] {
        &[]
    }

    /// Map one domain object to its base output fields.
    ///
    /// Must be pure with respect to shared state; the engine seeds every
    /// output object with the returned mapping.
    async fn transform(&self, data: &Value, ctx: &C) -> Result<Fields>;

    /// Resolve one relation to an included value.
    ///
    /// Called with the camel-normalized relation name (see [`relation_key`]),
    /// so `author_summary` and `author-summary` both arrive as
    /// `authorSummary`. Implementations match on the name and fall through
    /// to [`Transform::missing_resolver`] for anything they do not handle.
    async fn include(&self, relation: &str, _data: &Value, _ctx: &C) -> Result<Included<C>> {
        Err(self.missing_resolver(relation))
    }

    /// Configuration error for a relation without a resolver.
    fn missing_resolver(&self, relation: &str) -> Error {
        Error::missing_resolver(self.name(), relation)
    }
}

/// Canonical resolver key for a relation name.
///
/// Hyphen and underscore spellings collapse to camel form before resolver
/// dispatch: `author_summary` and `author-summary` both become
/// `authorSummary`. The leading character is lowercased.
pub fn relation_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut boundary = false;
    for ch in name.chars() {
        if ch == '-' || ch == '_' {
            boundary = true;
        } else if key.is_empty() {
            key.extend(ch.to_lowercase());
            boundary = false;
        } else if boundary {
            key.extend(ch.to_uppercase());
            boundary = false;
        } else {
            key.push(ch);
        }
    }
    key
}

/// Resolver identifier reported in configuration errors: `books` expands to
/// `includeBooks`.
pub fn resolver_key(name: &str) -> String {
    let key = relation_key(name);
    let mut ident = String::with_capacity(key.len() + 7);
    ident.push_str("include");
    let mut chars = key.chars();
    if let Some(first) = chars.next() {
        ident.extend(first.to_uppercase());
        ident.push_str(chars.as_str());
    }
    ident
}
