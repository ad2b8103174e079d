//! Error types for cache operations

use thiserror::Error;

/// Result type for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Error types for cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backing store failed. Callers must treat this as a miss, not as a
    /// request failure.
    #[error("cache backend error: {0}")]
    Backend(String),

    /// A cache key could not be derived from the request
    #[error("invalid cache key: {0}")]
    InvalidKey(String),
}

impl CacheError {
    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Create an invalid key error
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey(message.into())
    }
}
