//! Resolver capabilities supplied by other modules

use async_trait::async_trait;
use std::future::Future;

use crate::context::Context;
use crate::types::Permission;

/// Resolves attributes in scopes to one or more scopes evaluated by logical or
///
/// E.g. `dashboards:id:1` → `dashboards:uid:test-dashboard`, `folders:uid:test-folder`.
#[async_trait]
pub trait ScopeAttributeResolver: Send + Sync {
    /// Resolve `scope` within organization `org_id`
    ///
    /// Returning an empty list is valid and means the scope resolves to nothing.
    async fn resolve(&self, ctx: &Context, org_id: i64, scope: &str) -> anyhow::Result<Vec<String>>;
}

/// Adapter allowing async closures to be used as [`ScopeAttributeResolver`]s
///
/// ```
/// use cretoai_accesscontrol::resolvers::resolver_fn;
///
/// let resolver = resolver_fn(|_ctx, _org_id, scope: String| async move {
///     Ok::<_, anyhow::Error>(vec![scope.replace(":id:", ":uid:")])
/// });
/// # let _ = resolver;
/// ```
pub struct ScopeAttributeResolverFn<F>(F);

/// Wraps a closure into a [`ScopeAttributeResolverFn`]
pub fn resolver_fn<F, Fut>(f: F) -> ScopeAttributeResolverFn<F>
where
    F: Fn(Context, i64, String) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Vec<String>>> + Send + 'static,
{
    ScopeAttributeResolverFn(f)
}

#[async_trait]
impl<F, Fut> ScopeAttributeResolver for ScopeAttributeResolverFn<F>
where
    F: Fn(Context, i64, String) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Vec<String>>> + Send + 'static,
{
    async fn resolve(&self, ctx: &Context, org_id: i64, scope: &str) -> anyhow::Result<Vec<String>> {
        (self.0)(ctx.clone(), org_id, scope.to_string()).await
    }
}

/// Maps action sets to the primitive actions they imply
pub trait ActionResolver: Send + Sync {
    /// Returns the action sets that include `action`
    ///
    /// E.g. `dashboards:read` → `dashboards:view`, `dashboards:edit`.
    fn resolve_action(&self, action: &str) -> Vec<String>;

    /// Returns the member actions of `action_set`
    fn resolve_action_set(&self, action_set: &str) -> Vec<String>;

    /// Replaces action set permissions with permissions for their member actions
    fn expand_action_sets(&self, permissions: Vec<Permission>) -> Vec<Permission>;
}
