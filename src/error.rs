//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for every cache operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// Operation invoked on a cache that was never constructed
    #[error("Cache is not initialized")]
    NotInitialized,

    /// Key absent from the cache, or present but expired
    #[error("Item not found in cache")]
    NotFound,

    /// Construction with a total capacity that cannot hold any entry
    #[error("Invalid capacity: {0} (must be greater than 0)")]
    InvalidCapacity(usize),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
