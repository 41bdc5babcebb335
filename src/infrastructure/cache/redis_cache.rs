//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache for fast alias lookups.
///
/// Uses `ConnectionManager`, which multiplexes commands over one connection
/// and reconnects transparently. Every command is bounded by the configured
/// operation timeout so a slow Redis only adds bounded latency.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
    op_timeout: Duration,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379/0"`)
    /// - `op_timeout` - upper bound for every GET/SET issued through this cache
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, op_timeout: Duration) -> CacheResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "url:".to_string(),
            op_timeout,
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, alias: &str) -> String {
        format!("{}{}", self.key_prefix, alias)
    }

    async fn bounded<T>(
        &self,
        op: impl Future<Output = redis::RedisResult<T>>,
    ) -> CacheResult<T> {
        tokio::time::timeout(self.op_timeout, op)
            .await
            .map_err(|_| CacheError::Timeout(self.op_timeout))?
            .map_err(|e| CacheError::Operation(e.to_string()))
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, alias: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(alias);
        let mut conn = self.client.clone();

        let cached = self.bounded(conn.get::<_, Option<String>>(&key)).await?;

        match &cached {
            Some(url) => debug!("Cache HIT: {} -> {}", alias, url),
            None => debug!("Cache MISS: {}", alias),
        }

        Ok(cached)
    }

    async fn set_url(&self, alias: &str, target_url: &str, ttl: Duration) -> CacheResult<()> {
        let key = self.build_key(alias);
        let mut conn = self.client.clone();
        // SET EX rejects a zero expiry.
        let ttl_seconds = ttl.as_secs().max(1);

        self.bounded(conn.set_ex::<_, _, ()>(&key, target_url, ttl_seconds))
            .await?;

        debug!(
            "Cache SET: {} -> {} (TTL: {}s)",
            alias, target_url, ttl_seconds
        );
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
