//! Utility functions for alias generation and input validation.
//!
//! - [`alias_generator`] - Random alias generation
//! - [`alias`] - Caller alias rules and static asset detection
//! - [`url_validation`] - Target URL validation

pub mod alias;
pub mod alias_generator;
pub mod url_validation;
