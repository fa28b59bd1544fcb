//! Error types for scope and action resolution

use thiserror::Error;

/// Access control resolution errors
#[derive(Debug, Error)]
pub enum AccessControlError {
    /// No resolver is registered for the scope's prefix
    #[error("No resolver found for scope prefix '{prefix}'")]
    ResolverNotFound { prefix: String },

    /// The matched resolver failed to produce concrete scopes
    #[error("Could not resolve {scope}: {source}")]
    ResolutionFailed {
        scope: String,
        #[source]
        source: anyhow::Error,
    },

    /// The caller's context was cancelled or its deadline passed
    #[error("Resolution of {scope} was cancelled")]
    Cancelled { scope: String },

    /// Invalid resolver configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AccessControlError {
    /// Returns true if no resolver matched the scope
    pub fn is_resolver_not_found(&self) -> bool {
        matches!(self, Self::ResolverNotFound { .. })
    }
}

/// Result type for access control operations
pub type Result<T> = std::result::Result<T, AccessControlError>;
