//! Schedule API handlers

use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use super::dto::{ScheduleDto, ScheduleUpdatedResponse, UpdateScheduleRequest};
use crate::application::ScheduleService;
use crate::infrastructure::database::repositories::ScheduleRepository;
use crate::interfaces::http::common::{ApiError, MessageResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

pub type SharedScheduleService = Arc<ScheduleService<ScheduleRepository>>;

#[derive(Clone)]
pub struct ScheduleHandlerState {
    pub schedules: SharedScheduleService,
}

#[utoipa::path(
    get,
    path = "/api/schedule",
    tag = "Schedule",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's weekly schedule", body = ScheduleDto),
        (status = 401, description = "Not authorized", body = MessageResponse)
    )
)]
pub async fn get_schedule(
    State(state): State<ScheduleHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ScheduleDto>, ApiError> {
    let schedule = state.schedules.get_or_create(&user.user_id).await?;
    Ok(Json(schedule.into()))
}

#[utoipa::path(
    put,
    path = "/api/schedule",
    tag = "Schedule",
    security(("bearer_auth" = [])),
    request_body = UpdateScheduleRequest,
    responses(
        (status = 200, description = "Schedule updated", body = ScheduleUpdatedResponse),
        (status = 400, description = "Invalid time for a day", body = MessageResponse),
        (status = 401, description = "Not authorized", body = MessageResponse),
        (status = 404, description = "Schedule not found", body = MessageResponse)
    )
)]
pub async fn update_schedule(
    State(state): State<ScheduleHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<UpdateScheduleRequest>,
) -> Result<Json<ScheduleUpdatedResponse>, ApiError> {
    let schedule = state
        .schedules
        .update(&user.user_id, request.into_patch())
        .await?;

    Ok(Json(ScheduleUpdatedResponse {
        message: "Schedule updated successfully".to_string(),
        schedule: schedule.into(),
    }))
}
