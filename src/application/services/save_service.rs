//! Mapping creation service.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::ServiceSettings;
use super::cache_write::{CacheWrite, write_through};
use crate::domain::error::StorageError;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::alias::validate_alias;
use crate::utils::alias_generator::AliasGenerator;
use crate::utils::url_validation::validate_target_url;

pub const URL_EXISTS: &str = "url already exists";
pub const SAVE_FAILED: &str = "failed to add url";

/// Attempts made with freshly generated aliases before giving up.
const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Result of a successful save.
#[derive(Debug)]
pub struct SavedUrl {
    pub id: i64,
    pub alias: String,
    pub cache: CacheWrite,
}

/// Service for creating alias → URL mappings.
///
/// # Flow
///
/// 1. Validate the target URL and, if present, the caller's alias
/// 2. Generate an alias when none was supplied
/// 3. Insert into the durable store
/// 4. Prime the cache (best-effort)
pub struct SaveService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    generator: Arc<dyn AliasGenerator>,
    settings: ServiceSettings,
}

impl SaveService {
    /// Creates a new save service.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        generator: Arc<dyn AliasGenerator>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            repository,
            cache,
            generator,
            settings,
        }
    }

    /// Stores a mapping for `target_url` under `alias`, or under a generated
    /// alias when `alias` is `None` or empty.
    ///
    /// # Collisions
    ///
    /// A caller-supplied alias that is already taken fails immediately. A
    /// generated alias that collides is replaced by a new one, up to 10 times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or the alias is invalid;
    /// nothing is written in that case.
    ///
    /// Returns [`AppError::Conflict`] if the alias is taken.
    ///
    /// Returns [`AppError::Internal`] on store failures.
    pub async fn save(
        &self,
        target_url: &str,
        alias: Option<String>,
    ) -> Result<SavedUrl, AppError> {
        validate_target_url(target_url)?;

        let requested = alias.filter(|a| !a.is_empty());
        if let Some(alias) = &requested {
            validate_alias(alias)?;
        }

        let (id, alias) = match requested {
            Some(alias) => {
                let id = self
                    .repository
                    .save(target_url, &alias)
                    .await
                    .map_err(|e| map_save_error(e, &alias))?;
                (id, alias)
            }
            None => self.insert_with_generated_alias(target_url).await?,
        };

        info!(id, alias = %alias, "Url saved");

        let cache = write_through(
            self.cache.as_ref(),
            &alias,
            target_url,
            self.settings.cache_ttl,
        )
        .await;

        Ok(SavedUrl { id, alias, cache })
    }

    async fn insert_with_generated_alias(
        &self,
        target_url: &str,
    ) -> Result<(i64, String), AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let alias = self.generator.generate(self.settings.alias_length);

            match self.repository.save(target_url, &alias).await {
                Ok(id) => return Ok((id, alias)),
                Err(StorageError::AliasExists(_)) => {
                    warn!(alias = %alias, attempt, "Generated alias already taken");
                }
                Err(e) => return Err(map_save_error(e, &alias)),
            }
        }

        warn!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "Gave up generating a free alias"
        );
        Err(AppError::conflict(URL_EXISTS))
    }
}

fn map_save_error(e: StorageError, alias: &str) -> AppError {
    match e {
        StorageError::AliasExists(_) => {
            info!(alias, "Url already exists");
            AppError::conflict(URL_EXISTS)
        }
        other => {
            error!(alias, error = %other, "Failed to add url");
            AppError::internal(SAVE_FAILED)
        }
    }
}
