//! HTTP middleware for authentication and observability.

pub mod basic_auth;
pub mod tracing;
