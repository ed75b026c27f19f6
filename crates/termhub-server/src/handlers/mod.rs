//! HTTP request handlers.

pub mod holidays;
pub mod terms;

use axum::Json;
use axum::response::IntoResponse;
use serde_json::json;

pub async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
