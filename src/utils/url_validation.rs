//! Validation of target URLs submitted for shortening.

use crate::error::AppError;
use url::Url;

pub const URL_REQUIRED: &str = "field URL is a required field";
pub const URL_INVALID: &str = "field URL is not a valid URL";

/// Checks that `target_url` is present and parses as an absolute URL.
///
/// The URL is not normalised; callers store the string exactly as submitted.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with [`URL_REQUIRED`] for an empty value
/// and [`URL_INVALID`] for anything [`Url::parse`] rejects (relative
/// references included).
pub fn validate_target_url(target_url: &str) -> Result<(), AppError> {
    if target_url.trim().is_empty() {
        return Err(AppError::bad_request(URL_REQUIRED));
    }

    Url::parse(target_url).map_err(|_| AppError::bad_request(URL_INVALID))?;

    Ok(())
}
