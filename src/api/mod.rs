//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and formats
//! responses according to the API contract. Route wiring lives in
//! [`crate::routes`].
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Basic auth and request tracing middleware

pub mod dto;
pub mod handlers;
pub mod middleware;
