//! Typed errors for the discovery library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur while running the discovery pipeline.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Generation or place-search provider failed (network, auth, quota).
    /// Not retried by the core; callers may retry a whole stage.
    #[error("provider error: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// No extractable JSON of the requested shape in a provider response.
    /// The stage that hit this is treated as having produced zero results.
    #[error("parse error: {reason}")]
    Parse { reason: String },

    /// Missing or invalid configuration (API key, base URL).
    #[error("config error: {0}")]
    Config(String),
}

impl DiscoveryError {
    /// Wrap a provider-side failure message.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into().into())
    }

    /// Build a parse failure with a reason.
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }
}

/// Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
