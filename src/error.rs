//! HTTP-facing error type.
//!
//! Every handler returns `Result<_, AppError>`. The response body is always
//! `{"status": "Error", "error": "<message>"}`; messages are fixed strings and
//! never carry internal error detail.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String },
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    NotFound { message: String },
    #[error("{message}")]
    Conflict { message: String },
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Runs inside the request span, so the request id is attached.
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::info!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let unauthorized = matches!(self, AppError::Unauthorized { .. });
        let body = ErrorBody {
            status: "Error",
            error: self.to_string(),
        };

        let mut response = (status, Json(body)).into_response();
        if unauthorized {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"url-alias\""),
            );
        }
        response
    }
}

/// Converts `validator` failures into a single user-facing message.
///
/// Field errors are reported in field-name order; only the first one is
/// returned, phrased as `field <Name> is ...`.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors
            .errors()
            .iter()
            .filter_map(|(field, kind)| match kind {
                ValidationErrorsKind::Field(errs) => Some((field.to_string(), errs)),
                _ => None,
            })
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .into_iter()
            .next()
            .map(|(field, errs)| describe_field_error(&field, errs))
            .unwrap_or_else(|| "invalid request".to_string());

        AppError::bad_request(message)
    }
}

fn describe_field_error(field: &str, errors: &[validator::ValidationError]) -> String {
    let label = field_label(field);
    let codes: Vec<&str> = errors.iter().map(|e| e.code.as_ref()).collect();

    if codes.iter().any(|c| *c == "required" || *c == "length") {
        format!("field {} is a required field", label)
    } else if codes.contains(&"url") {
        format!("field {} is not a valid URL", label)
    } else {
        format!("field {} is not valid", label)
    }
}

fn field_label(field: &str) -> String {
    match field {
        "url" => "URL".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}
