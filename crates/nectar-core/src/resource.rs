//! Resource wrappers
//!
//! A resource marks domain data as a single item, an ordered collection, or
//! an explicit absence, and binds it to the transformer that will shape it.
//! Resolvers return resources (or raw values) and the engine recurses into
//! them through child scopes.

use std::sync::Arc;

use serde_json::Value;

use crate::eager::EagerLoad;
use crate::transformer::Transform;

/// Tagged envelope around domain data awaiting transformation.
pub enum Resource<C = ()>
where
    C: Send + Sync,
{
    /// One domain object.
    Item {
        /// The domain object as JSON
        data: Value,
        /// Transformer shaping the object
        transformer: Arc<dyn Transform<C>>,
        /// Output-key override for the enclosing include
        name: Option<String>,
        /// Eager-load adapter for the object's relations
        loader: Option<Arc<dyn EagerLoad>>,
    },

    /// An ordered sequence of domain objects.
    Collection {
        /// The domain objects as JSON, in output order
        data: Vec<Value>,
        /// Transformer applied to every element
        transformer: Arc<dyn Transform<C>>,
        /// Output-key override for the container key (not per element)
        name: Option<String>,
        /// Eager-load adapter for each element's relations
        loader: Option<Arc<dyn EagerLoad>>,
    },

    /// Explicit absence; resolves to JSON `null` under its output key.
    Null,
}

impl<C> std::fmt::Debug for Resource<C>
where
    C: Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Item { data, name, .. } => f
                .debug_struct("Item")
                .field("data", data)
                .field("name", name)
                .finish(),
            Self::Collection { data, name, .. } => f
                .debug_struct("Collection")
                .field("data", data)
                .field("name", name)
                .finish(),
            Self::Null => write!(f, "Null"),
        }
    }
}

impl<C> Resource<C>
where
    C: Send + Sync,
{
    /// Wrap a single domain object.
    pub fn item(data: Value, transformer: Arc<dyn Transform<C>>) -> Self {
        Self::Item {
            data,
            transformer,
            name: None,
            loader: None,
        }
    }

    /// Wrap an ordered sequence of domain objects.
    pub fn collection(data: Vec<Value>, transformer: Arc<dyn Transform<C>>) -> Self {
        Self::Collection {
            data,
            transformer,
            name: None,
            loader: None,
        }
    }

    /// Explicit absence marker, distinct from omitting the key.
    pub fn null() -> Self {
        Self::Null
    }

    /// Override the output key used for this resource.
    ///
    /// Without an override, the include identifier itself becomes the key.
    /// No effect on [`Resource::Null`].
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        if let Self::Item { name: slot, .. } | Self::Collection { name: slot, .. } = &mut self {
            *slot = Some(name.into());
        }
        self
    }

    /// Attach an eager-load adapter consulted before include resolution.
    pub fn with_loader(mut self, loader: Arc<dyn EagerLoad>) -> Self {
        if let Self::Item { loader: slot, .. } | Self::Collection { loader: slot, .. } = &mut self
        {
            *slot = Some(loader);
        }
        self
    }

    /// Output-key override, if one was set.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Item { name, .. } | Self::Collection { name, .. } => name.as_deref(),
            Self::Null => None,
        }
    }
}

/// Value produced by an include resolver.
pub enum Included<C = ()>
where
    C: Send + Sync,
{
    /// A wrapped resource, transformed through a child scope
    Resource(Resource<C>),

    /// A raw value merged into the output unchanged, with no child scope
    Raw(Value),
}

impl<C> std::fmt::Debug for Included<C>
where
    C: Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resource(resource) => f.debug_tuple("Resource").field(resource).finish(),
            Self::Raw(value) => f.debug_tuple("Raw").field(value).finish(),
        }
    }
}

impl<C> Included<C>
where
    C: Send + Sync,
{
    /// Shorthand for including a single object.
    pub fn item(data: Value, transformer: Arc<dyn Transform<C>>) -> Self {
        Self::Resource(Resource::item(data, transformer))
    }

    /// Shorthand for including an ordered sequence of objects.
    pub fn collection(data: Vec<Value>, transformer: Arc<dyn Transform<C>>) -> Self {
        Self::Resource(Resource::collection(data, transformer))
    }

    /// Shorthand for an explicit absence.
    pub fn null() -> Self {
        Self::Resource(Resource::null())
    }

    /// Shorthand for a raw pass-through value.
    pub fn raw(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl<C> From<Resource<C>> for Included<C>
where
    C: Send + Sync,
{
    fn from(resource: Resource<C>) -> Self {
        Self::Resource(resource)
    }
}

impl<C> From<Value> for Included<C>
where
    C: Send + Sync,
{
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::transformer::Fields;
    use async_trait::async_trait;
    use serde_json::json;

    struct Passthrough;

    #[async_trait]
    impl Transform for Passthrough {
        async fn transform(&self, data: &Value, _ctx: &()) -> Result<Fields> {
            Ok(data.as_object().cloned().unwrap_or_default())
        }
    }

    #[test]
    fn test_item_has_no_name_by_default() {
        let resource = Resource::item(json!({"id": 1}), Arc::new(Passthrough));
        assert!(resource.name().is_none());
    }

    #[test]
    fn test_with_name_sets_override() {
        let resource = Resource::item(json!({"id": 1}), Arc::new(Passthrough)).with_name("writer");
        assert_eq!(resource.name(), Some("writer"));
    }

    #[test]
    fn test_with_name_applies_to_collection_container() {
        let resource =
            Resource::collection(vec![json!({"id": 1})], Arc::new(Passthrough)).with_name("books");
        assert_eq!(resource.name(), Some("books"));
    }

    #[test]
    fn test_null_ignores_name_override() {
        let resource = Resource::<()>::null().with_name("ignored");
        assert!(resource.name().is_none());
    }

    #[test]
    fn test_raw_value_converts_to_included() {
        let included: Included = json!([1, 2, 3]).into();
        match included {
            Included::Raw(value) => assert_eq!(value, json!([1, 2, 3])),
            Included::Resource(_) => panic!("expected raw value"),
        }
    }

    #[test]
    fn test_resource_converts_to_included() {
        let included: Included = Resource::item(json!({}), Arc::new(Passthrough)).into();
        assert!(matches!(included, Included::Resource(Resource::Item { .. })));
    }
}
