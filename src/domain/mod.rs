//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`error`] - Storage error taxonomy shared by all repository backends
//!
//! The domain layer has no dependencies on the HTTP or infrastructure layers.
//! Business flows (save, lookup) live in [`crate::application::services`].

pub mod entities;
pub mod error;
pub mod repositories;

pub use error::StorageError;
