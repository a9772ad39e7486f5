//! Time-off API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{TimeOffDto, TimeOffRequest, TimeOffResponse};
use crate::application::TimeOffService;
use crate::infrastructure::database::repositories::TimeOffRepository;
use crate::interfaces::http::common::{ApiError, MessageResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

pub type SharedTimeOffService = Arc<TimeOffService<TimeOffRepository>>;

#[derive(Clone)]
pub struct TimeOffHandlerState {
    pub time_off: SharedTimeOffService,
}

#[utoipa::path(
    get,
    path = "/api/timeoff",
    tag = "Time Off",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's requests, newest first", body = Vec<TimeOffDto>),
        (status = 401, description = "Not authorized", body = MessageResponse)
    )
)]
pub async fn list_time_off(
    State(state): State<TimeOffHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<TimeOffDto>>, ApiError> {
    let records = state.time_off.list(&user.user_id).await?;
    Ok(Json(records.into_iter().map(TimeOffDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/timeoff",
    tag = "Time Off",
    security(("bearer_auth" = [])),
    request_body = TimeOffRequest,
    responses(
        (status = 201, description = "Request created", body = TimeOffResponse),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 401, description = "Not authorized", body = MessageResponse)
    )
)]
pub async fn create_time_off(
    State(state): State<TimeOffHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<TimeOffRequest>,
) -> Result<(StatusCode, Json<TimeOffResponse>), ApiError> {
    let created = state
        .time_off
        .create(&user.user_id, request.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TimeOffResponse {
            message: "Time off request created successfully".to_string(),
            time_off: created.into(),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/timeoff/{id}",
    tag = "Time Off",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Time-off request id")),
    request_body = TimeOffRequest,
    responses(
        (status = 200, description = "Request updated", body = TimeOffResponse),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 401, description = "Not authorized", body = MessageResponse),
        (status = 404, description = "Time off request not found", body = MessageResponse)
    )
)]
pub async fn update_time_off(
    State(state): State<TimeOffHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<TimeOffRequest>,
) -> Result<Json<TimeOffResponse>, ApiError> {
    let updated = state
        .time_off
        .update(&user.user_id, &id, request.into())
        .await?;

    Ok(Json(TimeOffResponse {
        message: "Time off request updated successfully".to_string(),
        time_off: updated.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/timeoff/{id}",
    tag = "Time Off",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Time-off request id")),
    responses(
        (status = 200, description = "Request deleted", body = MessageResponse),
        (status = 401, description = "Not authorized", body = MessageResponse),
        (status = 404, description = "Time off request not found", body = MessageResponse)
    )
)]
pub async fn delete_time_off(
    State(state): State<TimeOffHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.time_off.delete(&user.user_id, &id).await?;
    Ok(Json(MessageResponse::new(
        "Time off request deleted successfully",
    )))
}
