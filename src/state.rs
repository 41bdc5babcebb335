//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{LookupService, SaveService, ServiceSettings};
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::CacheService;
use crate::utils::alias_generator::AliasGenerator;

/// Handles to the services used by the HTTP layer.
///
/// Cloned per request; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub save_service: Arc<SaveService>,
    pub lookup_service: Arc<LookupService>,
}

impl AppState {
    /// Wires the save and lookup services over one store and one cache.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        generator: Arc<dyn AliasGenerator>,
        settings: ServiceSettings,
    ) -> Self {
        let lookup_service = Arc::new(LookupService::new(
            repository.clone(),
            cache.clone(),
            settings.cache_ttl,
        ));
        let save_service = Arc::new(SaveService::new(repository, cache, generator, settings));

        Self {
            save_service,
            lookup_service,
        }
    }
}
