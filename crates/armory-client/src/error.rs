//! Error types for the Blizzard API client

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Token endpoint unreachable or credentials rejected. Never retried by
    /// the token manager itself.
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// Non-2xx data response after retries are exhausted, or a transport
    /// failure (reported with status 500 by convention).
    #[error("upstream request failed with status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// A 2xx payload that does not match the expected shape
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid region: {0}")]
    InvalidRegion(String),

    /// Missing or malformed environment configuration
    #[error("configuration error: {0}")]
    Config(String),
}

// Helper methods for common error construction
impl Error {
    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create an upstream error with an explicit status code
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Wrap a transport-level failure, defaulting to status 500 when the
    /// error carries no HTTP status.
    pub fn transport(err: &reqwest::Error) -> Self {
        let status = err.status().map_or(500, |s| s.as_u16());
        Self::Upstream {
            status,
            message: err.to_string(),
        }
    }

    /// The upstream status code, when this error carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
