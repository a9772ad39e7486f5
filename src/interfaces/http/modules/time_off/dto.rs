//! Time-off DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::TimeOffInput;
use crate::domain::TimeOff;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeOffDto {
    pub id: String,
    pub user_id: String,
    /// `vacation`, `dayOff`, `sickLeave` or `other`
    #[serde(rename = "type")]
    pub kind: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    pub end_date: String,
    pub description: Option<String>,
    /// `pending`, `approved` or `rejected`
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TimeOff> for TimeOffDto {
    fn from(t: TimeOff) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            kind: t.kind.as_str().to_string(),
            start_date: t.start_date.format("%Y-%m-%d").to_string(),
            end_date: t.end_date.format("%Y-%m-%d").to_string(),
            description: t.description,
            status: t.status.as_str().to_string(),
            created_at: t.created_at.to_rfc3339(),
            updated_at: t.updated_at.to_rfc3339(),
        }
    }
}

/// Create and update body. `endDate` is ignored for `dayOff`.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeOffRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

impl From<TimeOffRequest> for TimeOffInput {
    fn from(r: TimeOffRequest) -> Self {
        Self {
            kind: r.kind.unwrap_or_default(),
            start_date: r.start_date.unwrap_or_default(),
            end_date: r.end_date,
            description: r.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TimeOffResponse {
    pub message: String,
    #[serde(rename = "timeOff")]
    pub time_off: TimeOffDto,
}
