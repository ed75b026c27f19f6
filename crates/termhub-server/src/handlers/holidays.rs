//! Holiday endpoints.

use axum::Extension;
use axum::extract::State;
use axum::response::Response;
use axum::Json;

use termhub_gateway::{CurrentUser, RequestContext};

use crate::dto::{HolidaysByOrgListResponse, UploadHolidaysRequest};
use crate::error::ApiError;
use crate::response;
use crate::services::HolidayService;
use crate::state::AppState;

fn service(state: &AppState) -> HolidayService {
    HolidayService::new(
        state.holidays.clone(),
        state.organizations.clone(),
        state.messages.clone(),
    )
}

pub async fn holidays_for_web(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response, ApiError> {
    let holidays_org = service(&state).holidays_for_web(&ctx, &user).await?;
    Ok(response::success(
        "get holidays successfully",
        HolidaysByOrgListResponse { holidays_org },
    ))
}

pub async fn upload_holidays(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<UploadHolidaysRequest>,
) -> Result<Response, ApiError> {
    service(&state).upload(&ctx, &user, req).await?;
    Ok(response::success_empty("upload holidays successfully"))
}
