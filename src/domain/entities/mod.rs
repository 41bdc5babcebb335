//! Core domain entities.
//!
//! The service persists a single entity, [`UrlMapping`]. The cache holds
//! copies of its `target_url` keyed by alias but never owns it.

pub mod url_mapping;

pub use url_mapping::UrlMapping;
