//! Route tree assembly.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{healthz, holidays, terms};
use crate::middleware::authentication_middleware;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/v1/terms", get(terms::list_terms).post(terms::create_term))
        .route("/v1/terms/upload", post(terms::upload_terms))
        .route("/v1/terms/current", get(terms::current_term))
        .route("/v1/terms/org/{organization_id}", get(terms::terms_by_org))
        .route(
            "/v1/terms/student/{student_id}",
            get(terms::terms_for_student),
        )
        .route(
            "/v1/terms/{id}",
            get(terms::get_term)
                .put(terms::update_term)
                .delete(terms::delete_term),
        )
        .route("/v1/holidays", get(holidays::holidays_for_web))
        .route("/v1/holidays/upload", post(holidays::upload_holidays))
        .layer(from_fn_with_state(state.clone(), authentication_middleware));

    Router::new()
        .route("/healthz", get(healthz))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
