//! API-boundary error type and its HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use termhub_core::CoreError;
use termhub_gateway::RemoteCallError;
use termhub_storage::StorageError;

pub const ERR_INVALID_REQUEST: &str = "ERR_INVALID_REQUEST";
pub const ERR_UNAUTHORIZED: &str = "ERR_UNAUTHORIZED";
pub const ERR_FORBIDDEN: &str = "ERR_FORBIDDEN";
pub const ERR_NOT_FOUND: &str = "ERR_NOT_FOUND";
pub const ERR_UPSTREAM: &str = "ERR_UPSTREAM";
pub const ERR_INTERNAL: &str = "ERR_INTERNAL";

/// Errors surfaced by handlers and services.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] RemoteCallError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        if err.is_client_error() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, ERR_INVALID_REQUEST),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, ERR_UNAUTHORIZED),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, ERR_FORBIDDEN),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, ERR_NOT_FOUND),
            Self::Upstream(e) => match e {
                RemoteCallError::AuthContext(_) => (StatusCode::UNAUTHORIZED, ERR_UNAUTHORIZED),
                RemoteCallError::Remote { status: 404, .. } => {
                    (StatusCode::NOT_FOUND, ERR_NOT_FOUND)
                }
                _ => (StatusCode::BAD_GATEWAY, ERR_UPSTREAM),
            },
            Self::Storage(e) => match e {
                StorageError::NotFound { .. } => (StatusCode::NOT_FOUND, ERR_NOT_FOUND),
                StorageError::InvalidId(_) => (StatusCode::BAD_REQUEST, ERR_INVALID_REQUEST),
                StorageError::Internal { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, ERR_INTERNAL)
                }
            },
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ERR_INTERNAL),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        let message = self.to_string();

        tracing::error!(
            status_code = status.as_u16(),
            error_code = error_code,
            error = %message,
            "request failed"
        );

        let body = json!({
            "status_code": status.as_u16(),
            "error": message,
            "error_code": error_code,
        });

        (status, Json(body)).into_response()
    }
}
