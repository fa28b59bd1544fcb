//! Resolver configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AccessControlError, Result};

/// Lifetime of a cached scope resolution
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

/// Interval between background sweeps of expired cache entries
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(2 * 60);

/// Resolver cache settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolversConfig {
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

fn default_cache_ttl() -> u64 { DEFAULT_CACHE_TTL.as_secs() }
fn default_cleanup_interval() -> u64 { DEFAULT_CLEANUP_INTERVAL.as_secs() }

impl Default for ResolversConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

impl ResolversConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl_secs == 0 {
            return Err(AccessControlError::InvalidConfig(
                "cache_ttl_secs must be greater than zero".to_string(),
            ));
        }
        if self.cleanup_interval_secs < self.cache_ttl_secs {
            return Err(AccessControlError::InvalidConfig(format!(
                "cleanup_interval_secs ({}) must not be shorter than cache_ttl_secs ({})",
                self.cleanup_interval_secs, self.cache_ttl_secs
            )));
        }
        Ok(())
    }
}
