//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET|HEAD /health`  - Liveness check (public)
//! - `POST /url`         - Save a mapping (Basic auth when configured)
//! - `GET  /`            - `index.html` from `STATIC_DIR` (optional)
//! - `GET  /style.css`, `/script.js` - Static assets (optional)
//! - `GET  /{alias}`     - Alias redirect (public)
//!
//! # Middleware (outermost first)
//!
//! - **Path normalization** - Trailing slash handling
//! - **Request id** - `x-request-id` set (UUID) when absent and echoed on the response
//! - **Tracing** - Request span carrying the request id
//! - **Timeout** - Per-request deadline

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::api::handlers::{health_handler, redirect_handler, save_handler};
use crate::api::middleware::basic_auth::{self, BasicAuthCredentials};
use crate::api::middleware::tracing;
use crate::config::Config;
use crate::state::AppState;
use axum::http::{HeaderName, StatusCode};
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeFile;
use tower_http::timeout::TimeoutLayer;

/// Router knobs that come from configuration rather than from state.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Required on `POST /url` when set.
    pub basic_auth: Option<BasicAuthCredentials>,
    /// Directory holding `index.html`, `style.css` and `script.js`.
    pub static_dir: Option<PathBuf>,
    pub request_timeout: Duration,
}

impl RouterOptions {
    pub fn from_config(config: &Config) -> Self {
        let basic_auth = match (&config.http_user, &config.http_password) {
            (Some(user), Some(password)) => Some(BasicAuthCredentials::new(user, password)),
            _ => None,
        };

        Self {
            basic_auth,
            static_dir: config.static_dir.clone(),
            request_timeout: config.http_timeout(),
        }
    }
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            basic_auth: None,
            static_dir: None,
            request_timeout: Duration::from_secs(4),
        }
    }
}

/// Builds the router with every route and layer except path normalization.
///
/// Integration tests drive this directly; the server uses [`app_router`].
pub fn build_router(state: AppState, options: &RouterOptions) -> Router {
    let mut save_routes = Router::new().route("/url", post(save_handler));
    if let Some(credentials) = &options.basic_auth {
        save_routes = save_routes.route_layer(middleware::from_fn_with_state(
            Arc::new(credentials.clone()),
            basic_auth::layer,
        ));
    }

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .merge(save_routes);

    if let Some(dir) = &options.static_dir {
        router = router
            .route_service("/", ServeFile::new(dir.join("index.html")))
            .route_service("/style.css", ServeFile::new(dir.join("style.css")))
            .route_service("/script.js", ServeFile::new(dir.join("script.js")));
    }

    let request_id = HeaderName::from_static(tracing::REQUEST_ID_HEADER);

    let timeout =
        TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, options.request_timeout);

    router
        .route("/{alias}", get(redirect_handler))
        .with_state(state)
        .layer(timeout)
        .layer(tracing::layer())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState, options: &RouterOptions) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, options))
}
