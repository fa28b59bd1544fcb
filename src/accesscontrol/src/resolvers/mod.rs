//! Resolver registry
//!
//! [`Resolvers`] maps scope prefixes to [`ScopeAttributeResolver`]s and holds
//! the optional [`ActionResolver`]. It is built once at startup, shared by
//! cloning, and populated by the modules that own each resource kind.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use cretoai_accesscontrol::{resolvers::resolver_fn, Context, Resolvers};
//!
//! # async fn example() -> cretoai_accesscontrol::Result<()> {
//! let resolvers = Resolvers::new();
//! resolvers.add_scope_attribute_resolver(
//!     "dashboards:id:",
//!     Arc::new(resolver_fn(|_ctx, _org_id, _scope| async {
//!         Ok::<_, anyhow::Error>(vec!["dashboards:uid:abc".to_string()])
//!     })),
//! );
//!
//! let mutator = resolvers.get_scope_attribute_mutator(1);
//! let scopes = mutator.resolve(&Context::background(), "dashboards:id:1").await?;
//! assert_eq!(scopes, vec!["dashboards:uid:abc"]);
//! # Ok(())
//! # }
//! ```

mod action_set;
mod mutator;
mod traits;

pub use action_set::ActionSetResolver;
pub use mutator::ScopeAttributeMutator;
pub use traits::{resolver_fn, ActionResolver, ScopeAttributeResolver, ScopeAttributeResolverFn};

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::cache::{CacheStats, LocalCache};
use crate::config::ResolversConfig;
use crate::scope::ScopeKey;

/// Cache of resolved scopes per (organization, scope)
pub(crate) type ScopeCache = LocalCache<ScopeKey, Vec<String>>;

/// Registry of scope attribute resolvers and the action resolver
///
/// Cloning is cheap; all clones share the same registrations and cache.
#[derive(Clone)]
pub struct Resolvers {
    /// Resolved scopes, shared by every mutator
    cache: Arc<ScopeCache>,

    /// Scope prefix -> resolver
    attribute_resolvers: Arc<RwLock<HashMap<String, Arc<dyn ScopeAttributeResolver>>>>,

    /// Optional action set expansion
    action_resolver: Arc<RwLock<Option<Arc<dyn ActionResolver>>>>,
}

impl Resolvers {
    /// Create an empty registry with the default cache settings
    pub fn new() -> Self {
        let config = ResolversConfig::default();
        Self::build(&config)
    }

    /// Create an empty registry with custom cache settings
    ///
    /// Production registries always use the fixed defaults.
    #[cfg(test)]
    pub(crate) fn with_config(config: ResolversConfig) -> crate::error::Result<Self> {
        config.validate()?;
        Ok(Self::build(&config))
    }

    fn build(config: &ResolversConfig) -> Self {
        Self {
            cache: Arc::new(LocalCache::new(config.cache_ttl(), config.cleanup_interval())),
            attribute_resolvers: Arc::new(RwLock::new(HashMap::new())),
            action_resolver: Arc::new(RwLock::new(None)),
        }
    }

    /// Register `resolver` for scopes starting with `prefix`
    ///
    /// A resolver already registered for the same prefix is replaced.
    pub fn add_scope_attribute_resolver(
        &self,
        prefix: impl Into<String>,
        resolver: Arc<dyn ScopeAttributeResolver>,
    ) {
        let prefix = prefix.into();
        debug!(prefix = %prefix, "Adding scope attribute resolver");

        let previous = self.attribute_resolvers.write().insert(prefix.clone(), resolver);
        if previous.is_some() {
            debug!(prefix = %prefix, "Replaced existing scope attribute resolver");
        }
    }

    /// Install the action resolver, replacing any previous one
    pub fn set_action_resolver(&self, resolver: Arc<dyn ActionResolver>) {
        debug!("Setting action resolver");
        *self.action_resolver.write() = Some(resolver);
    }

    /// Returns a scope mutator bound to `org_id`
    pub fn get_scope_attribute_mutator(&self, org_id: i64) -> ScopeAttributeMutator {
        ScopeAttributeMutator::new(self.clone(), org_id)
    }

    /// Returns the action set expansion function
    pub fn get_action_set_resolver(&self) -> ActionSetResolver {
        ActionSetResolver::new(self.clone())
    }

    /// Returns true if a resolver is registered for `prefix`
    pub fn has_resolver(&self, prefix: &str) -> bool {
        self.attribute_resolvers.read().contains_key(prefix)
    }

    /// Registered prefixes, sorted
    pub fn prefixes(&self) -> Vec<String> {
        let mut prefixes: Vec<String> = self.attribute_resolvers.read().keys().cloned().collect();
        prefixes.sort();
        prefixes
    }

    /// Returns statistics of the resolution cache
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Start sweeping expired cache entries in the background
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start_cache_cleanup(&self) {
        self.cache.start_cleanup_task();
    }

    /// Stop the background sweep
    pub fn stop_cache_cleanup(&self) {
        self.cache.stop_cleanup_task();
    }

    pub(crate) fn cache(&self) -> &ScopeCache {
        &self.cache
    }

    /// Resolver for `prefix`; the lock is released before returning
    pub(crate) fn attribute_resolver(&self, prefix: &str) -> Option<Arc<dyn ScopeAttributeResolver>> {
        self.attribute_resolvers.read().get(prefix).cloned()
    }

    pub(crate) fn action_resolver(&self) -> Option<Arc<dyn ActionResolver>> {
        self.action_resolver.read().clone()
    }
}

impl Default for Resolvers {
    fn default() -> Self {
        Self::new()
    }
}
