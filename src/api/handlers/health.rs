//! Handler for the health endpoint.

use axum::Json;

use crate::api::dto::health::HealthResponse;

/// Liveness check.
///
/// `GET /health` and `HEAD /health` always answer 200; dependencies are not
/// checked.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
