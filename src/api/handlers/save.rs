//! Handler for the save endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::info;
use validator::Validate;

use crate::api::dto::save::{SaveUrlRequest, SaveUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

pub const DECODE_FAILED: &str = "failed to decode request";

/// Stores a new alias → URL mapping.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "alias": "abc" }
/// ```
///
/// `alias` may be omitted or empty, in which case one is generated.
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "abc" }
/// ```
///
/// # Errors
///
/// - 400 if the body cannot be decoded or validation fails
/// - 409 if the alias is taken
/// - 500 if the store fails
pub async fn save_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveUrlRequest>, JsonRejection>,
) -> Result<Json<SaveUrlResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        info!(reason = %rejection.body_text(), "Failed to decode request body");
        AppError::bad_request(DECODE_FAILED)
    })?;

    request.validate()?;

    let SaveUrlRequest { url, alias } = request;
    let url = url.unwrap_or_default();

    let saved = state.save_service.save(&url, alias).await?;

    Ok(Json(SaveUrlResponse::ok(saved.alias)))
}
