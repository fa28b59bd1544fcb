//! # CretoAI Access Control Resolvers
//!
//! Resolves parameterized permission scopes into concrete scopes and expands
//! action sets into the primitive actions they imply.
//!
//! ## Features
//!
//! - **Prefix dispatch**: scopes are routed to resolvers by their `kind:attribute:` prefix
//! - **Per-organization caching** of resolved scopes with a 30 second TTL
//! - **Background eviction** of expired entries every 2 minutes
//! - **Action set expansion** through a pluggable [`ActionResolver`]
//! - **Cancellation** via a request [`Context`]
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use cretoai_accesscontrol::{resolvers::resolver_fn, Context, Resolvers};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolvers = Resolvers::new();
//!     resolvers.start_cache_cleanup();
//!
//!     resolvers.add_scope_attribute_resolver(
//!         "dashboards:id:",
//!         Arc::new(resolver_fn(|_ctx, _org_id, _scope| async {
//!             Ok::<_, anyhow::Error>(vec![
//!                 "dashboards:uid:abc".to_string(),
//!                 "folders:uid:xyz".to_string(),
//!             ])
//!         })),
//!     );
//!
//!     let mutator = resolvers.get_scope_attribute_mutator(7);
//!     let scopes = mutator.resolve(&Context::background(), "dashboards:id:1").await?;
//!     assert_eq!(scopes, vec!["dashboards:uid:abc", "folders:uid:xyz"]);
//!
//!     let expand = resolvers.get_action_set_resolver();
//!     assert_eq!(expand.resolve(&Context::background(), "dashboards:read"), vec!["dashboards:read"]);
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod resolvers;
pub mod scope;
pub mod types;

// Re-export commonly used types
pub use cache::{CacheStats, LocalCache};
pub use config::ResolversConfig;
pub use context::Context;
pub use error::{AccessControlError, Result};
pub use resolvers::{
    ActionResolver, ActionSetResolver, Resolvers, ScopeAttributeMutator, ScopeAttributeResolver,
};
pub use scope::{scope_prefix, ScopeKey};
pub use types::Permission;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
