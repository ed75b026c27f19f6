//! Authentication middleware.
//!
//! Builds the per-request [`RequestContext`] from the `Authorization` and
//! `X-App-Language` headers, resolves the current user through the
//! (possibly cached) user directory, and stores both in request extensions
//! for downstream handlers.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode, header::AUTHORIZATION};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use termhub_gateway::{APP_LANGUAGE_HEADER, RequestContext};

use crate::state::AppState;

/// Locale used when the caller sends none.
pub const DEFAULT_APP_LANGUAGE: u32 = 1;

pub async fn authentication_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let locale = req
        .headers()
        .get(APP_LANGUAGE_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(parse_app_language)
        .unwrap_or(DEFAULT_APP_LANGUAGE);

    let auth_header = match req.headers().get(AUTHORIZATION).and_then(|h| h.to_str().ok()) {
        Some(header) if !header.is_empty() => header,
        _ => {
            tracing::debug!(path = %req.uri().path(), "No Authorization header");
            return error_response(StatusCode::FORBIDDEN, "authorization header required");
        }
    };

    let token = match auth_header.strip_prefix("Bearer ") {
        Some(t) if !t.is_empty() => t,
        _ => {
            return error_response(StatusCode::UNAUTHORIZED, "invalid authorization header");
        }
    };

    let ctx = RequestContext::new().with_token(token).with_locale(locale);

    // Resolve the caller through the user directory so handlers can make
    // authorization decisions without re-fetching.
    match state.users.current_user(&ctx).await {
        Ok(current_user) => {
            tracing::debug!(user_id = %current_user.id, "request authenticated");
            req.extensions_mut().insert(ctx);
            req.extensions_mut().insert(current_user);
            next.run(req).await
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to get current user");
            error_response(StatusCode::UNAUTHORIZED, "unauthorized")
        }
    }
}

/// Parses the `X-App-Language` header, tolerating surrounding quotes.
fn parse_app_language(header: &str) -> u32 {
    header
        .trim()
        .trim_matches('"')
        .parse()
        .unwrap_or(DEFAULT_APP_LANGUAGE)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "status_code": status.as_u16(),
            "error": message,
        })),
    )
        .into_response()
}
