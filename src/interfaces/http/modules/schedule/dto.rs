//! Schedule DTOs
//!
//! Day keys are capitalised weekday names; slot fields are camelCase.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{DaySlot, DaySlotPatch, Schedule, SchedulePatch, Weekday};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DaySlotDto {
    pub start_time: String,
    pub end_time: String,
}

impl From<DaySlot> for DaySlotDto {
    fn from(slot: DaySlot) -> Self {
        Self {
            start_time: slot.start_time,
            end_time: slot.end_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDto {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "Monday")]
    pub monday: DaySlotDto,
    #[serde(rename = "Tuesday")]
    pub tuesday: DaySlotDto,
    #[serde(rename = "Wednesday")]
    pub wednesday: DaySlotDto,
    #[serde(rename = "Thursday")]
    pub thursday: DaySlotDto,
    #[serde(rename = "Friday")]
    pub friday: DaySlotDto,
    #[serde(rename = "Saturday")]
    pub saturday: DaySlotDto,
    #[serde(rename = "Sunday")]
    pub sunday: DaySlotDto,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Schedule> for ScheduleDto {
    fn from(s: Schedule) -> Self {
        let hours = s.hours;
        Self {
            id: s.id,
            user_id: s.user_id,
            monday: hours.monday.into(),
            tuesday: hours.tuesday.into(),
            wednesday: hours.wednesday.into(),
            thursday: hours.thursday.into(),
            friday: hours.friday.into(),
            saturday: hours.saturday.into(),
            sunday: hours.sunday.into(),
            created_at: s.created_at.to_rfc3339(),
            updated_at: s.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DaySlotRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Partial update: absent days and absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateScheduleRequest {
    #[serde(rename = "Monday")]
    pub monday: Option<DaySlotRequest>,
    #[serde(rename = "Tuesday")]
    pub tuesday: Option<DaySlotRequest>,
    #[serde(rename = "Wednesday")]
    pub wednesday: Option<DaySlotRequest>,
    #[serde(rename = "Thursday")]
    pub thursday: Option<DaySlotRequest>,
    #[serde(rename = "Friday")]
    pub friday: Option<DaySlotRequest>,
    #[serde(rename = "Saturday")]
    pub saturday: Option<DaySlotRequest>,
    #[serde(rename = "Sunday")]
    pub sunday: Option<DaySlotRequest>,
}

impl UpdateScheduleRequest {
    pub fn into_patch(self) -> SchedulePatch {
        let days = [
            (Weekday::Monday, self.monday),
            (Weekday::Tuesday, self.tuesday),
            (Weekday::Wednesday, self.wednesday),
            (Weekday::Thursday, self.thursday),
            (Weekday::Friday, self.friday),
            (Weekday::Saturday, self.saturday),
            (Weekday::Sunday, self.sunday),
        ]
        .into_iter()
        .filter_map(|(day, slot)| {
            slot.map(|s| {
                (
                    day,
                    DaySlotPatch {
                        start_time: s.start_time,
                        end_time: s.end_time,
                    },
                )
            })
        })
        .collect();

        SchedulePatch { days }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleUpdatedResponse {
    pub message: String,
    pub schedule: ScheduleDto,
}
