//! Term endpoints.

use axum::Extension;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use termhub_gateway::{CurrentUser, RequestContext};

use crate::dto::{
    TermListResponse, TermResponse, TermsByOrgListResponse, UploadTermItem, UpsertTermRequest,
    map_terms,
};
use crate::error::ApiError;
use crate::response;
use crate::services::TermService;
use crate::state::AppState;

fn service(state: &AppState) -> TermService {
    TermService::new(
        state.terms.clone(),
        state.users.clone(),
        state.organizations.clone(),
    )
}

pub async fn list_terms(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response, ApiError> {
    let terms_org = service(&state).list_for_admin(&ctx, &user).await?;
    Ok(response::success(
        "get terms successfully",
        TermsByOrgListResponse { terms_org },
    ))
}

pub async fn create_term(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<UpsertTermRequest>,
) -> Result<Response, ApiError> {
    let term = service(&state).create(&user, req).await?;
    Ok(response::success(
        "create term successfully",
        TermResponse::from(&term),
    ))
}

pub async fn get_term(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let term = service(&state).get(&id).await?;
    Ok(response::success(
        "get term successfully",
        TermResponse::from(&term),
    ))
}

pub async fn update_term(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpsertTermRequest>,
) -> Result<Response, ApiError> {
    let term = service(&state).update(&id, req).await?;
    Ok(response::success(
        "update term successfully",
        TermResponse::from(&term),
    ))
}

pub async fn delete_term(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    service(&state).delete(&id).await?;
    Ok(response::success_empty("delete term successfully"))
}

pub async fn current_term(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response, ApiError> {
    let term = service(&state).current_term(&user).await?;
    Ok(response::success(
        "get current term successfully",
        term.as_ref().map(TermResponse::from),
    ))
}

pub async fn upload_terms(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(items): Json<Vec<UploadTermItem>>,
) -> Result<Response, ApiError> {
    service(&state).upload(&user, items).await?;
    Ok(response::success_empty("upload terms successfully"))
}

pub async fn terms_by_org(
    State(state): State<AppState>,
    Path(organization_id): Path<String>,
) -> Result<Response, ApiError> {
    let terms = service(&state).terms_by_org(&organization_id).await?;
    Ok(response::success(
        "get terms successfully",
        TermListResponse {
            terms: map_terms(&terms),
        },
    ))
}

pub async fn terms_for_student(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(student_id): Path<String>,
) -> Result<Response, ApiError> {
    let terms = service(&state).terms_for_student(&ctx, &student_id).await?;
    Ok(response::success(
        "get terms successfully",
        TermListResponse {
            terms: map_terms(&terms),
        },
    ))
}
