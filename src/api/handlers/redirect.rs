//! Handler for alias redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;
use url::Url;

use crate::application::services::lookup_service::INTERNAL_ERROR;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its target URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Lookup
///
/// The cache is consulted first. On a miss, or when the cache is down, the
/// store is read and the result is written back to the cache.
///
/// # Errors
///
/// - 404 if the alias is unknown or looks like a static asset
/// - 500 if the store fails
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let resolved = state.lookup_service.resolve(&alias).await?;

    let location = location_header(&resolved.target_url).map_err(|reason| {
        error!(alias = %alias, error = %reason, "Target URL is not a valid Location header");
        AppError::internal(INTERNAL_ERROR)
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Builds the `Location` value for a stored target URL.
///
/// Targets are stored as given. One that is already a valid header value is
/// sent unchanged; otherwise (non-ASCII path, query or host) the `Url`
/// serialisation is sent, which is percent-encoded ASCII.
fn location_header(target_url: &str) -> Result<HeaderValue, String> {
    if let Ok(value) = HeaderValue::from_str(target_url) {
        return Ok(value);
    }

    let url = Url::parse(target_url).map_err(|e| e.to_string())?;
    HeaderValue::from_str(url.as_str()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_target_is_sent_unchanged() {
        assert_eq!(
            location_header("https://example.com").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            location_header("https://example.com/path?q=1").unwrap(),
            "https://example.com/path?q=1"
        );
    }

    #[test]
    fn test_non_ascii_path_is_percent_encoded() {
        let value = location_header("https://example.com/café").unwrap();
        assert_eq!(value, "https://example.com/caf%C3%A9");
    }

    #[test]
    fn test_unicode_host_becomes_punycode() {
        let value = location_header("https://bücher.example/").unwrap();
        assert_eq!(value, "https://xn--bcher-kva.example/");
    }

    #[test]
    fn test_unparseable_non_ascii_target_is_rejected() {
        assert!(location_header("not a url\u{e9}").is_err());
    }
}
