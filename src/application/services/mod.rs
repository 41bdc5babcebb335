//! Business logic services for the application layer.

pub mod cache_write;
pub mod lookup_service;
pub mod save_service;

pub use cache_write::CacheWrite;
pub use lookup_service::{LookupService, LookupSource, ResolvedUrl};
pub use save_service::{SaveService, SavedUrl};

use std::time::Duration;

use crate::config::Config;

/// Default length of generated aliases.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Default lifetime of a cached mapping.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Tunables shared by the save and lookup services.
#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    pub alias_length: usize,
    pub cache_ttl: Duration,
}

impl ServiceSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            alias_length: config.alias_length,
            cache_ttl: config.cache_ttl(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            alias_length: DEFAULT_ALIAS_LENGTH,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}
