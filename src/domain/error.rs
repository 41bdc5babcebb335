//! Errors reported by the durable store.

use thiserror::Error;

/// Failure modes of a [`crate::domain::repositories::UrlRepository`].
///
/// `AliasExists` is derived from the store's unique constraint on `alias`,
/// never from a lookup made before the insert.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("alias '{0}' already exists")]
    AliasExists(String),

    #[error("alias '{0}' not found")]
    NotFound(String),

    #[error("storage failure: {0}")]
    Internal(String),
}

impl StorageError {
    pub fn internal(e: impl std::fmt::Display) -> Self {
        Self::Internal(e.to_string())
    }
}
