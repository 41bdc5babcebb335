//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

use crate::domain::entities::UrlMapping;
use crate::domain::error::StorageError;
use crate::domain::repositories::UrlRepository;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS url (
        id BIGSERIAL PRIMARY KEY,
        alias TEXT NOT NULL UNIQUE,
        url TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const CREATE_ALIAS_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_alias ON url (alias)";

/// PostgreSQL repository for alias → URL mappings.
///
/// Uses bound parameters for every statement. Alias uniqueness is enforced by
/// the `UNIQUE` constraint on `url.alias`; inserts never look the alias up first.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Creates the mapping table and the alias index if they are missing.
    ///
    /// Safe to call on every startup.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Internal`] if either statement fails.
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TABLE)
            .execute(self.pool.as_ref())
            .await
            .map_err(StorageError::internal)?;

        sqlx::query(CREATE_ALIAS_INDEX)
            .execute(self.pool.as_ref())
            .await
            .map_err(StorageError::internal)?;

        info!("Database schema ready");
        Ok(())
    }

    /// Counts stored mappings.
    pub async fn count(&self) -> Result<i64, StorageError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM url")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(StorageError::internal)
    }

    /// Returns the most recently created mappings, newest first.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<UrlMapping>, StorageError> {
        sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT id, alias, url AS target_url, created_at
            FROM url
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(StorageError::internal)
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn save(&self, target_url: &str, alias: &str) -> Result<i64, StorageError> {
        sqlx::query_scalar::<_, i64>("INSERT INTO url (url, alias) VALUES ($1, $2) RETURNING id")
            .bind(target_url)
            .bind(alias)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| map_insert_error(e, alias))
    }

    async fn get_by_alias(&self, alias: &str) -> Result<String, StorageError> {
        sqlx::query_scalar::<_, String>("SELECT url FROM url WHERE alias = $1")
            .bind(alias)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(StorageError::internal)?
            .ok_or_else(|| StorageError::NotFound(alias.to_string()))
    }
}

fn map_insert_error(e: sqlx::Error, alias: &str) -> StorageError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return StorageError::AliasExists(alias.to_string());
    }

    StorageError::internal(e)
}
