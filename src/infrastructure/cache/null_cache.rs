//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache implementation that stores nothing.
///
/// Every lookup is a miss and every write succeeds, so all reads go to the
/// durable store.
///
/// # Use Cases
///
/// - Deployments without Redis
/// - The admin CLI, which talks to the database directly
/// - Fallback when the Redis connection fails at startup
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_url(&self, _alias: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_url(&self, _alias: &str, _target_url: &str, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "none"
    }
}
