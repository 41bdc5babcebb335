//! In-process cache with per-entry expiry.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    target_url: String,
    expires_at: Instant,
}

/// Cache that lives inside the service process.
///
/// Entries carry an absolute deadline measured on the tokio clock. Expired
/// entries read as a miss and are removed on that read; nothing sweeps them
/// in the background, and there is no size bound beyond the TTL.
///
/// Suitable for single-instance deployments without Redis and for tests.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, alias: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();

        // The read guard must be released before `remove_if` locks the shard.
        let live = match self.entries.get(alias) {
            None => {
                debug!("Cache MISS: {}", alias);
                return Ok(None);
            }
            Some(entry) if entry.expires_at > now => Some(entry.target_url.clone()),
            Some(_) => None,
        };

        if live.is_none() {
            self.entries.remove_if(alias, |_, entry| entry.expires_at <= now);
            debug!("Cache EXPIRED: {}", alias);
        }

        Ok(live)
    }

    async fn set_url(&self, alias: &str, target_url: &str, ttl: Duration) -> CacheResult<()> {
        self.entries.insert(
            alias.to_string(),
            Entry {
                target_url: target_url.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
