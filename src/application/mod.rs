//! Application layer services implementing business logic.
//!
//! Services orchestrate the durable store, the cache and the alias generator.
//! They consume traits only, so they run unchanged against PostgreSQL and
//! Redis in production and against mocks or in-memory fakes in tests.
//!
//! # Available Services
//!
//! - [`services::save_service::SaveService`] - Validates and stores new mappings, primes the cache
//! - [`services::lookup_service::LookupService`] - Cache-aside alias resolution

pub mod services;
