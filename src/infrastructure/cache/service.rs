//! Cache service trait and error types.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// A cache miss is not an error; it is reported as `Ok(None)` by
/// [`CacheService::get_url`].
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),

    #[error("Cache operation error: {0}")]
    Operation(String),

    #[error("Cache operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching alias → URL mappings.
///
/// The cache is never the source of truth. Implementations report backend
/// failures as errors and leave the decision to fall back to the durable
/// store to the caller.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process cache with per-entry deadlines
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the target URL cached for an alias.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss (including expired entries)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend is unreachable or the command fails.
    async fn get_url(&self, alias: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping that expires automatically after `ttl`.
    ///
    /// Overwrites any existing entry for the same alias.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the value could not be stored.
    async fn set_url(&self, alias: &str, target_url: &str, ttl: Duration) -> CacheResult<()>;

    /// Short backend name used in logs.
    fn backend(&self) -> &'static str;
}
