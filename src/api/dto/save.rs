//! DTOs for the save endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /url`.
///
/// `url` is optional at the type level so a missing field becomes a
/// validation failure (`field URL is a required field`) instead of a decode
/// failure.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveUrlRequest {
    #[validate(required, length(min = 1), url)]
    pub url: Option<String>,

    /// Caller-chosen alias; generated when absent or empty.
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveUrlResponse {
    pub status: &'static str,
    pub alias: String,
}

impl SaveUrlResponse {
    pub fn ok(alias: String) -> Self {
        Self {
            status: "OK",
            alias,
        }
    }
}
