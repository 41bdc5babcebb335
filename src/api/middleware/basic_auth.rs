//! HTTP Basic authentication for write endpoints.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBasic;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use tracing::info;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Credentials accepted by [`layer`].
///
/// Only keyed digests of the configured user and password are kept, so a
/// presented pair is checked in constant time whatever its length.
#[derive(Clone)]
pub struct BasicAuthCredentials {
    user: String,
    key: [u8; 32],
    user_tag: Vec<u8>,
    password_tag: Vec<u8>,
}

impl BasicAuthCredentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        let user = user.into();
        let mut key = [0u8; 32];
        rand::rng().fill(&mut key);

        let user_tag = tag(&key, user.as_bytes()).finalize().into_bytes().to_vec();
        let password_tag = tag(&key, password.into().as_bytes())
            .finalize()
            .into_bytes()
            .to_vec();

        Self {
            user,
            key,
            user_tag,
            password_tag,
        }
    }

    pub fn matches(&self, user: &str, password: Option<&str>) -> bool {
        let Some(password) = password else {
            return false;
        };

        let user_ok = tag(&self.key, user.as_bytes())
            .verify_slice(&self.user_tag)
            .is_ok();
        let password_ok = tag(&self.key, password.as_bytes())
            .verify_slice(&self.password_tag)
            .is_ok();

        user_ok & password_ok
    }
}

fn tag(key: &[u8], value: &[u8]) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(value);
    mac
}

impl std::fmt::Debug for BasicAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthCredentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Rejects requests without matching `Authorization: Basic ...` credentials.
///
/// # Errors
///
/// Returns `401 Unauthorized` with a `WWW-Authenticate: Basic` challenge if the
/// header is missing, malformed, or carries other credentials.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/url", post(save_handler))
///     .route_layer(middleware::from_fn_with_state(credentials, basic_auth::layer));
/// ```
pub async fn layer(
    State(credentials): State<Arc<BasicAuthCredentials>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBasic((user, password)) = AuthBasic::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| AppError::unauthorized("unauthorized"))?;

    if !credentials.matches(&user, password.as_deref()) {
        info!(user = %user, "Rejected basic auth credentials");
        return Err(AppError::unauthorized("unauthorized"));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}
