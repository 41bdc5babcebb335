#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;
use url_alias::application::services::ServiceSettings;
use url_alias::domain::error::StorageError;
use url_alias::domain::repositories::UrlRepository;
use url_alias::infrastructure::cache::{
    CacheError, CacheResult, CacheService, MemoryCache, NullCache,
};
use url_alias::routes::{RouterOptions, build_router};
use url_alias::state::AppState;
use url_alias::utils::alias_generator::{AliasGenerator, RandomAliasGenerator};

/// Store fake backed by a `DashMap`; the entry API gives the same
/// insert-or-conflict behaviour as the `UNIQUE` constraint.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    rows: DashMap<String, (i64, String)>,
    next_id: AtomicI64,
    lookups: AtomicUsize,
    saves: AtomicUsize,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `get_by_alias` calls served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Number of `save` calls, including rejected ones.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn save(&self, target_url: &str, alias: &str) -> Result<i64, StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);

        match self.rows.entry(alias.to_string()) {
            Entry::Occupied(_) => Err(StorageError::AliasExists(alias.to_string())),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                slot.insert((id, target_url.to_string()));
                Ok(id)
            }
        }
    }

    async fn get_by_alias(&self, alias: &str) -> Result<String, StorageError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        self.rows
            .get(alias)
            .map(|row| row.1.clone())
            .ok_or_else(|| StorageError::NotFound(alias.to_string()))
    }
}

/// Store fake whose every call fails.
pub struct BrokenUrlRepository;

#[async_trait]
impl UrlRepository for BrokenUrlRepository {
    async fn save(&self, _target_url: &str, _alias: &str) -> Result<i64, StorageError> {
        Err(StorageError::Internal("connection refused".to_string()))
    }

    async fn get_by_alias(&self, _alias: &str) -> Result<String, StorageError> {
        Err(StorageError::Internal("connection refused".to_string()))
    }
}

/// Store fake that answers lookups only after a delay.
pub struct SlowUrlRepository(pub Duration);

#[async_trait]
impl UrlRepository for SlowUrlRepository {
    async fn save(&self, _target_url: &str, _alias: &str) -> Result<i64, StorageError> {
        tokio::time::sleep(self.0).await;
        Ok(1)
    }

    async fn get_by_alias(&self, _alias: &str) -> Result<String, StorageError> {
        tokio::time::sleep(self.0).await;
        Ok("https://example.com".to_string())
    }
}

/// Cache fake that behaves like an unreachable Redis.
pub struct FailingCache;

#[async_trait]
impl CacheService for FailingCache {
    async fn get_url(&self, _alias: &str) -> CacheResult<Option<String>> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn set_url(&self, _alias: &str, _target_url: &str, _ttl: Duration) -> CacheResult<()> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

/// Generator fake that hands out a fixed list of aliases in order.
pub struct ScriptedAliasGenerator {
    aliases: Vec<String>,
    next: AtomicUsize,
}

impl ScriptedAliasGenerator {
    pub fn new(aliases: &[&str]) -> Self {
        Self {
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            next: AtomicUsize::new(0),
        }
    }
}

impl AliasGenerator for ScriptedAliasGenerator {
    fn generate(&self, _length: usize) -> String {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        self.aliases[i % self.aliases.len()].clone()
    }
}

pub fn create_test_state(
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
) -> AppState {
    create_test_state_with_generator(repository, cache, Arc::new(RandomAliasGenerator))
}

pub fn create_test_state_with_generator(
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    generator: Arc<dyn AliasGenerator>,
) -> AppState {
    AppState::new(repository, cache, generator, ServiceSettings::default())
}

pub fn create_app(state: AppState) -> Router {
    build_router(state, &RouterOptions::default())
}

pub fn create_server(state: AppState) -> TestServer {
    TestServer::new(create_app(state)).unwrap()
}

/// Server over an in-memory store and an in-process cache.
pub fn memory_server() -> (TestServer, Arc<InMemoryUrlRepository>, Arc<MemoryCache>) {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let cache = Arc::new(MemoryCache::new());
    let server = create_server(create_test_state(repo.clone(), cache.clone()));
    (server, repo, cache)
}

/// Server over an in-memory store with caching disabled.
pub fn uncached_server() -> (TestServer, Arc<InMemoryUrlRepository>) {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = create_server(create_test_state(repo.clone(), Arc::new(NullCache::new())));
    (server, repo)
}
