//! Scope chaining and the resolution engine
//!
//! A scope is the traversal state for one node of the include tree: the
//! resource being shaped, the ancestor include chain, the caller's requested
//! paths, and the shared request context. Resolution walks the tree
//! depth-first, producing one plain JSON value per scope and merging child
//! results bottom-up.
//!
//! Scopes are ephemeral: created by the resolution call that owns them and
//! discarded when it returns. The ancestor chain is an owned list of include
//! identifiers passed by value into each child, so no scope holds a
//! reference back to its parent.

use std::sync::Arc;

use futures::future::{self, BoxFuture};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::eager::EagerLoad;
use crate::error::{Error, Result};
use crate::requests::RequestedPaths;
use crate::resource::{Included, Resource};
use crate::transformer::{Transform, relation_key};

/// Default bound on include recursion depth.
///
/// A transformer whose resolver reuses its own transformer (directly or
/// through a cycle) would otherwise recurse without bound when every depth
/// is requested or included by default.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Traversal state for one node of the include tree.
pub struct Scope<C = ()>
where
    C: Send + Sync,
{
    resource: Resource<C>,
    requested: Arc<RequestedPaths>,
    ancestry: Vec<String>,
    identifier: Option<String>,
    ctx: Arc<C>,
    max_depth: usize,
}

impl<C> Scope<C>
where
    C: Send + Sync + 'static,
{
    /// Build the root scope for one transformation call.
    ///
    /// `includes` is the caller's list of fully-qualified dotted include
    /// paths; it is validated here and shared immutably with every child
    /// scope.
    pub fn root<S: AsRef<str>>(resource: Resource<C>, includes: &[S], ctx: C) -> Result<Self> {
        Self::root_with_depth(resource, includes, ctx, DEFAULT_MAX_DEPTH)
    }

    /// Build a root scope with an explicit include depth limit.
    pub fn root_with_depth<S: AsRef<str>>(
        resource: Resource<C>,
        includes: &[S],
        ctx: C,
        max_depth: usize,
    ) -> Result<Self> {
        Ok(Self {
            resource,
            requested: Arc::new(RequestedPaths::parse(includes)?),
            ancestry: Vec::new(),
            identifier: None,
            ctx: Arc::new(ctx),
            max_depth,
        })
    }

    /// Resolve this scope into a plain JSON value.
    ///
    /// Items become objects, collections become order-preserving arrays of
    /// objects, and the null resource becomes JSON `null`. Any failure
    /// aborts the whole call; there is no partial output.
    pub async fn resolve(&self) -> Result<Value> {
        match &self.resource {
            Resource::Null => Ok(Value::Null),
            Resource::Item {
                data,
                transformer,
                loader,
                ..
            } => {
                self.resolve_element(data.clone(), transformer.clone(), loader.clone())
                    .await
            }
            Resource::Collection {
                data,
                transformer,
                loader,
                ..
            } => {
                // Elements share no mutable state, so they resolve
                // concurrently; try_join_all re-applies results in input
                // order.
                let elements = data.iter().map(|element| {
                    self.resolve_element(element.clone(), transformer.clone(), loader.clone())
                });
                Ok(Value::Array(future::try_join_all(elements).await?))
            }
        }
    }

    /// Transform one domain object and merge its resolved includes.
    async fn resolve_element(
        &self,
        mut data: Value,
        transformer: Arc<dyn Transform<C>>,
        loader: Option<Arc<dyn EagerLoad>>,
    ) -> Result<Value> {
        let mut fields = transformer.transform(&data, &self.ctx).await?;

        let includes = self.plan_includes(transformer.as_ref());
        if includes.is_empty() {
            return Ok(Value::Object(fields));
        }
        trace!(transformer = transformer.name(), includes = ?includes, "resolving includes");

        if let Some(loader) = &loader {
            self.eager_load(loader.as_ref(), &includes, &mut data)
                .await?;
        }

        for include in &includes {
            let resolved = transformer
                .include(&relation_key(include), &data, &self.ctx)
                .await?;
            let (key, value) = match resolved {
                Included::Raw(value) => (include.clone(), value),
                Included::Resource(resource) => {
                    let key = resource.name().unwrap_or(include.as_str()).to_string();
                    let child = self.child(resource, include)?;
                    (key, resolve_boxed(child).await?)
                }
            };
            fields.insert(key, value);
        }

        Ok(Value::Object(fields))
    }

    /// Includes to resolve for this scope: default includes first, then the
    /// requested available includes, each in declared order, deduplicated
    /// preserving first occurrence.
    fn plan_includes(&self, transformer: &dyn Transform<C>) -> Vec<String> {
        let mut plan: Vec<String> = Vec::new();
        for relation in transformer.default_include() {
            if !plan.iter().any(|planned| planned == relation) {
                plan.push((*relation).to_string());
            }
        }
        for relation in transformer.available_include() {
            if self.is_requested(relation) && !plan.iter().any(|planned| planned == relation) {
                plan.push((*relation).to_string());
            }
        }
        plan
    }

    /// Whether `relation`'s fully-qualified path is in the caller request.
    fn is_requested(&self, relation: &str) -> bool {
        self.requested.matches(&self.qualified_path(relation))
    }

    /// Dotted path segments from the root down to `relation` at this scope.
    fn qualified_path(&self, relation: &str) -> Vec<String> {
        let mut path = self.ancestry.clone();
        if let Some(identifier) = &self.identifier {
            path.push(identifier.clone());
        }
        path.push(relation.to_string());
        path
    }

    /// Hand the loader the requested relations that are still absent.
    ///
    /// A key holding JSON `null` is a known-empty relation and is skipped;
    /// a present non-null key is already loaded.
    async fn eager_load(
        &self,
        loader: &dyn EagerLoad,
        includes: &[String],
        data: &mut Value,
    ) -> Result<()> {
        let missing: Vec<String> = includes
            .iter()
            .filter(|relation| loader.can_load(relation))
            .filter(|relation| {
                data.as_object()
                    .is_none_or(|object| !object.contains_key(relation.as_str()))
            })
            .cloned()
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        debug!(relations = ?missing, "eager loading relations");
        loader.load(data, &missing).await
    }

    /// Create the child scope for an included resource.
    ///
    /// The child's ancestor chain is this scope's chain extended with this
    /// scope's own identifier; its length equals the child's tree depth.
    fn child(&self, resource: Resource<C>, include: &str) -> Result<Scope<C>> {
        let path = self.qualified_path(include);
        if path.len() > self.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.max_depth,
                path: path.join("."),
            });
        }
        let mut ancestry = path;
        ancestry.pop();
        Ok(Scope {
            resource,
            requested: self.requested.clone(),
            ancestry,
            identifier: Some(include.to_string()),
            ctx: self.ctx.clone(),
            max_depth: self.max_depth,
        })
    }
}

/// Boxed recursion point: an include's child scope resolves through the same
/// engine.
fn resolve_boxed<C>(scope: Scope<C>) -> BoxFuture<'static, Result<Value>>
where
    C: Send + Sync + 'static,
{
    Box::pin(async move { scope.resolve().await })
}

/// Transform a single domain object into API-ready JSON.
///
/// Serializes `data`, wraps it as an item resource, and resolves it with the
/// requested includes and shared context.
pub async fn item<C, T>(
    data: &T,
    transformer: Arc<dyn Transform<C>>,
    includes: &[&str],
    ctx: C,
) -> Result<Value>
where
    C: Send + Sync + 'static,
    T: Serialize + ?Sized,
{
    let resource = Resource::item(serde_json::to_value(data)?, transformer);
    Scope::root(resource, includes, ctx)?.resolve().await
}

/// Transform an ordered sequence of domain objects into an API-ready JSON
/// array, one element per input object, order-preserving.
pub async fn collection<C, T>(
    data: &[T],
    transformer: Arc<dyn Transform<C>>,
    includes: &[&str],
    ctx: C,
) -> Result<Value>
where
    C: Send + Sync + 'static,
    T: Serialize,
{
    let data = data
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let resource = Resource::collection(data, transformer);
    Scope::root(resource, includes, ctx)?.resolve().await
}
