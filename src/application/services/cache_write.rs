//! Best-effort cache population.

use std::time::Duration;
use tracing::{debug, warn};

use crate::infrastructure::cache::{CacheError, CacheService};

/// Outcome of a best-effort cache write.
///
/// A failed write never fails the request that triggered it, but the error is
/// kept so callers and tests can observe it.
#[derive(Debug)]
#[must_use]
pub enum CacheWrite {
    Stored,
    Failed(CacheError),
}

impl CacheWrite {
    pub fn is_stored(&self) -> bool {
        matches!(self, CacheWrite::Stored)
    }
}

/// Writes `alias → target_url` into the cache, logging a failure at `warn`.
pub async fn write_through(
    cache: &dyn CacheService,
    alias: &str,
    target_url: &str,
    ttl: Duration,
) -> CacheWrite {
    match cache.set_url(alias, target_url, ttl).await {
        Ok(()) => {
            debug!(alias, backend = cache.backend(), "Cached url");
            CacheWrite::Stored
        }
        Err(e) => {
            warn!(alias, backend = cache.backend(), error = %e, "Failed to cache url");
            CacheWrite::Failed(e)
        }
    }
}
