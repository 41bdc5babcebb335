//! PostgreSQL repository implementations.
//!
//! Queries go through SQLx with bound parameters. The schema is bootstrapped
//! at startup by [`PgUrlRepository::ensure_schema`] rather than by migrations.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - Alias → URL mapping storage and retrieval

pub mod pg_url_repository;

pub use pg_url_repository::PgUrlRepository;
