//! The response envelope this service emits.
//!
//! Mirrors the downstream wire shape: successes carry
//! `{status_code, message, data}`, failures `{status_code, error,
//! error_code}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// A 200 envelope around `data`.
pub fn success<T: Serialize>(message: impl Into<String>, data: T) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            status_code: StatusCode::OK.as_u16(),
            message: Some(message.into()),
            data: Some(data),
        }),
    )
        .into_response()
}

/// A 200 envelope with no payload (acknowledgements).
pub fn success_empty(message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::<()> {
            status_code: StatusCode::OK.as_u16(),
            message: Some(message.into()),
            data: None,
        }),
    )
        .into_response()
}
