//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs derive `validator::Validate`; validation failures convert into
//! [`crate::error::AppError`] with a user-facing message.

pub mod health;
pub mod save;
