//! Repository trait for the durable alias store.

use crate::domain::error::StorageError;
use async_trait::async_trait;

/// Durable store for alias → URL mappings.
///
/// The store is the single source of truth. Uniqueness of `alias` is enforced
/// by the backend itself so that two concurrent saves of the same alias
/// cannot both succeed.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new mapping and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::AliasExists`] when the insert violates the
    /// unique constraint on `alias`.
    ///
    /// Returns [`StorageError::Internal`] on any other database error.
    async fn save(&self, target_url: &str, alias: &str) -> Result<i64, StorageError>;

    /// Looks up the target URL for an alias.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no mapping exists for `alias`.
    ///
    /// Returns [`StorageError::Internal`] on database errors.
    async fn get_by_alias(&self, alias: &str) -> Result<String, StorageError>;
}
