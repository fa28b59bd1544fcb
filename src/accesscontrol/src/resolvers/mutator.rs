//! Per-organization scope mutation with caching

use tracing::{debug, warn};

use super::Resolvers;
use crate::context::Context;
use crate::error::{AccessControlError, Result};
use crate::scope::{scope_prefix, ScopeKey};

/// Resolves scopes for a single organization
///
/// Results are cached per (organization, scope) for the registry's TTL.
/// Failures are never cached. Two concurrent misses for the same scope may
/// both call the resolver; the last write wins.
#[derive(Clone)]
pub struct ScopeAttributeMutator {
    resolvers: Resolvers,
    org_id: i64,
}

impl ScopeAttributeMutator {
    pub(crate) fn new(resolvers: Resolvers, org_id: i64) -> Self {
        Self { resolvers, org_id }
    }

    /// Organization this mutator resolves scopes for
    pub fn org_id(&self) -> i64 {
        self.org_id
    }

    /// Resolves `scope` into the concrete scopes it stands for
    ///
    /// # Errors
    ///
    /// - [`AccessControlError::ResolverNotFound`] if no resolver handles the scope's prefix
    /// - [`AccessControlError::ResolutionFailed`] if the resolver failed
    /// - [`AccessControlError::Cancelled`] if `ctx` finished before the resolver did
    pub async fn resolve(&self, ctx: &Context, scope: &str) -> Result<Vec<String>> {
        let key = ScopeKey::new(self.org_id, scope);

        // Check cache before computing the scope
        if let Some(scopes) = self.resolvers.cache().get(&key) {
            debug!(scope, org_id = self.org_id, resolved_scopes = ?scopes, "Used cache to resolve scope");
            return Ok(scopes);
        }

        let prefix = scope_prefix(scope);
        let Some(resolver) = self.resolvers.attribute_resolver(&prefix) else {
            return Err(AccessControlError::ResolverNotFound { prefix });
        };

        if ctx.is_done() {
            return Err(AccessControlError::Cancelled { scope: scope.to_string() });
        }

        let resolved = tokio::select! {
            biased;
            result = resolver.resolve(ctx, self.org_id, scope) => result,
            _ = ctx.done() => {
                return Err(AccessControlError::Cancelled { scope: scope.to_string() });
            }
        };

        let scopes = resolved.map_err(|source| {
            warn!(scope, org_id = self.org_id, error = %source, "Scope resolver failed");
            AccessControlError::ResolutionFailed {
                scope: scope.to_string(),
                source,
            }
        })?;

        self.resolvers.cache().set_default(key, scopes.clone());
        debug!(scope, org_id = self.org_id, resolved_scopes = ?scopes, "Resolved scope");
        Ok(scopes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolvers::resolver_fn;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_resolver_not_found() {
        let resolvers = Resolvers::new();
        let mutator = resolvers.get_scope_attribute_mutator(1);

        let err = mutator.resolve(&Context::background(), "dashboards:id:1").await.unwrap_err();
        assert!(matches!(err, AccessControlError::ResolverNotFound { ref prefix } if prefix == "dashboards:id:"));
        assert_eq!(resolvers.cache_stats().entries, 0);
    }

    #[tokio::test]
    async fn test_empty_result_is_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let resolvers = Resolvers::new();
        resolvers.add_scope_attribute_resolver(
            "dashboards:id:",
            Arc::new(resolver_fn(move |_ctx, _org_id, _scope| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, anyhow::Error>(Vec::new()) }
            })),
        );
        let mutator = resolvers.get_scope_attribute_mutator(1);

        assert!(mutator.resolve(&Context::background(), "dashboards:id:404").await.unwrap().is_empty());
        assert!(mutator.resolve(&Context::background(), "dashboards:id:404").await.unwrap().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_scope_uses_empty_prefix() {
        let resolvers = Resolvers::new();
        let mutator = resolvers.get_scope_attribute_mutator(1);
        assert!(mutator.resolve(&Context::background(), "").await.unwrap_err().is_resolver_not_found());

        resolvers.add_scope_attribute_resolver(
            "",
            Arc::new(resolver_fn(|_ctx, _org_id, _scope| async {
                Ok::<_, anyhow::Error>(vec!["*".to_string()])
            })),
        );
        assert_eq!(mutator.resolve(&Context::background(), "").await.unwrap(), vec!["*"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_during_resolution() {
        let resolvers = Resolvers::new();
        resolvers.add_scope_attribute_resolver(
            "dashboards:id:",
            Arc::new(resolver_fn(|_ctx, _org_id, _scope| async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok::<_, anyhow::Error>(vec!["dashboards:uid:slow".to_string()])
            })),
        );
        let mutator = resolvers.get_scope_attribute_mutator(1);
        let ctx = Context::background().with_timeout(Duration::from_secs(1));

        let err = mutator.resolve(&ctx, "dashboards:id:1").await.unwrap_err();
        assert!(matches!(err, AccessControlError::Cancelled { .. }));
        assert_eq!(resolvers.cache_stats().entries, 0);
    }

    #[tokio::test]
    async fn test_cancelled_context_still_served_from_cache() {
        let resolvers = Resolvers::new();
        resolvers.add_scope_attribute_resolver(
            "dashboards:id:",
            Arc::new(resolver_fn(|_ctx, _org_id, _scope| async {
                Ok::<_, anyhow::Error>(vec!["dashboards:uid:abc".to_string()])
            })),
        );
        let mutator = resolvers.get_scope_attribute_mutator(1);
        mutator.resolve(&Context::background(), "dashboards:id:1").await.unwrap();

        let ctx = Context::background();
        ctx.cancel();
        assert_eq!(
            mutator.resolve(&ctx, "dashboards:id:1").await.unwrap(),
            vec!["dashboards:uid:abc"]
        );
        assert!(matches!(
            mutator.resolve(&ctx, "dashboards:id:2").await,
            Err(AccessControlError::Cancelled { .. })
        ));
    }
}
