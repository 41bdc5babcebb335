//! Cache-aside alias resolution.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use super::cache_write::{CacheWrite, write_through};
use crate::domain::error::StorageError;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::alias::is_static_asset;

pub const NOT_FOUND: &str = "not found";
pub const INVALID_REQUEST: &str = "invalid request";
pub const INTERNAL_ERROR: &str = "internal error";

/// Where a resolved URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    Cache,
    Store,
}

#[derive(Debug)]
pub struct ResolvedUrl {
    pub target_url: String,
    pub source: LookupSource,
    /// Outcome of the write-back; `None` on a cache hit.
    pub cache_write: Option<CacheWrite>,
}

/// Resolves aliases through the cache, falling back to the durable store.
///
/// A cache that errors is treated exactly like a miss. A store hit is written
/// back to the cache with the configured TTL.
pub struct LookupService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    cache_ttl: Duration,
}

impl LookupService {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            cache_ttl,
        }
    }

    /// Resolves `alias` to its target URL.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for an empty alias
    /// - [`AppError::NotFound`] for static asset names and unknown aliases
    /// - [`AppError::Internal`] when the store fails
    pub async fn resolve(&self, alias: &str) -> Result<ResolvedUrl, AppError> {
        if alias.is_empty() {
            return Err(AppError::bad_request(INVALID_REQUEST));
        }

        // Stray asset requests never reach the cache or the store.
        if is_static_asset(alias) {
            debug!(alias, "Static asset path, not an alias");
            return Err(AppError::not_found(NOT_FOUND));
        }

        match self.cache.get_url(alias).await {
            Ok(Some(target_url)) => {
                debug!(alias, backend = self.cache.backend(), "Cache HIT");
                return Ok(ResolvedUrl {
                    target_url,
                    source: LookupSource::Cache,
                    cache_write: None,
                });
            }
            Ok(None) => debug!(alias, "Cache MISS"),
            Err(e) => {
                warn!(alias, backend = self.cache.backend(), error = %e, "Cache read failed, using store");
            }
        }

        let target_url = match self.repository.get_by_alias(alias).await {
            Ok(url) => url,
            Err(StorageError::NotFound(_)) => {
                debug!(alias, "Alias not found");
                return Err(AppError::not_found(NOT_FOUND));
            }
            Err(e) => {
                error!(alias, error = %e, "Failed to get url");
                return Err(AppError::internal(INTERNAL_ERROR));
            }
        };

        let cache_write =
            write_through(self.cache.as_ref(), alias, &target_url, self.cache_ttl).await;

        Ok(ResolvedUrl {
            target_url,
            source: LookupSource::Store,
            cache_write: Some(cache_write),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::infrastructure::cache::{CacheError, MemoryCache, MockCacheService};

    const TTL: Duration = Duration::from_secs(300);

    fn service(repository: MockUrlRepository, cache: Arc<dyn CacheService>) -> LookupService {
        LookupService::new(Arc::new(repository), cache, TTL)
    }

    #[tokio::test]
    async fn test_cache_hit_skips_store() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_by_alias().times(0);

        let mut cache = MockCacheService::new();
        cache.expect_backend().return_const("mock");
        cache
            .expect_get_url()
            .withf(|alias| alias == "abc")
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));
        cache.expect_set_url().times(0);

        let resolved = service(repo, Arc::new(cache)).resolve("abc").await.unwrap();

        assert_eq!(resolved.target_url, "https://example.com");
        assert_eq!(resolved.source, LookupSource::Cache);
        assert!(resolved.cache_write.is_none());
    }

    #[tokio::test]
    async fn test_cache_miss_reads_store_and_writes_back() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_by_alias()
            .withf(|alias| alias == "abc")
            .times(1)
            .returning(|_| Ok("https://example.com".to_string()));

        let mut cache = MockCacheService::new();
        cache.expect_backend().return_const("mock");
        cache.expect_get_url().times(1).returning(|_| Ok(None));
        cache
            .expect_set_url()
            .withf(|alias, url, ttl| alias == "abc" && url == "https://example.com" && *ttl == TTL)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let resolved = service(repo, Arc::new(cache)).resolve("abc").await.unwrap();

        assert_eq!(resolved.source, LookupSource::Store);
        assert!(resolved.cache_write.unwrap().is_stored());
    }

    #[tokio::test]
    async fn test_cache_read_error_falls_back_to_store() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_by_alias()
            .times(1)
            .returning(|_| Ok("https://example.com".to_string()));

        let mut cache = MockCacheService::new();
        cache.expect_backend().return_const("mock");
        cache
            .expect_get_url()
            .times(1)
            .returning(|_| Err(CacheError::Timeout(Duration::from_millis(500))));
        cache
            .expect_set_url()
            .times(1)
            .returning(|_, _, _| Err(CacheError::Connection("refused".to_string())));

        let resolved = service(repo, Arc::new(cache)).resolve("abc").await.unwrap();

        assert_eq!(resolved.target_url, "https://example.com");
        assert!(matches!(
            resolved.cache_write,
            Some(CacheWrite::Failed(CacheError::Connection(_)))
        ));
    }

    #[tokio::test]
    async fn test_unknown_alias_is_not_found() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_by_alias()
            .times(1)
            .returning(|alias| Err(StorageError::NotFound(alias.to_string())));

        let mut cache = MockCacheService::new();
        cache.expect_get_url().returning(|_| Ok(None));
        cache.expect_set_url().times(0);

        let err = service(repo, Arc::new(cache))
            .resolve("missing")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "not found");
    }

    #[tokio::test]
    async fn test_store_failure_is_internal() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_by_alias()
            .times(1)
            .returning(|_| Err(StorageError::Internal("pool timed out".to_string())));

        let mut cache = MockCacheService::new();
        cache.expect_get_url().returning(|_| Ok(None));
        cache.expect_set_url().times(0);

        let err = service(repo, Arc::new(cache))
            .resolve("abc")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "internal error");
    }

    #[tokio::test]
    async fn test_empty_alias_is_bad_request() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_by_alias().times(0);
        let mut cache = MockCacheService::new();
        cache.expect_get_url().times(0);

        let err = service(repo, Arc::new(cache))
            .resolve("")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "invalid request");
    }

    #[tokio::test]
    async fn test_static_asset_touches_nothing() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_by_alias().times(0);
        let mut cache = MockCacheService::new();
        cache.expect_get_url().times(0);
        cache.expect_set_url().times(0);

        let svc = service(repo, Arc::new(cache));
        for path in ["favicon.ico", "style.css", "script.js"] {
            let err = svc.resolve(path).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound { .. }));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_read_once_per_ttl_window() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_by_alias()
            .times(2)
            .returning(|_| Ok("https://example.com".to_string()));

        let svc = service(repo, Arc::new(MemoryCache::new()));

        let first = svc.resolve("abc").await.unwrap();
        assert_eq!(first.source, LookupSource::Store);

        for _ in 0..5 {
            tokio::time::advance(Duration::from_secs(30)).await;
            let next = svc.resolve("abc").await.unwrap();
            assert_eq!(next.source, LookupSource::Cache);
        }

        tokio::time::advance(TTL).await;
        let after_expiry = svc.resolve("abc").await.unwrap();
        assert_eq!(after_expiry.source, LookupSource::Store);
    }
}
