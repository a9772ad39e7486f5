//! Schedule service: lazy default creation and partial updates

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, Schedule, SchedulePatch, ScheduleRepositoryInterface, Weekday,
};
use crate::shared::is_valid_time;

pub struct ScheduleService<S: ScheduleRepositoryInterface> {
    repo: Arc<S>,
}

impl<S: ScheduleRepositoryInterface> ScheduleService<S> {
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }

    /// The caller's schedule, created with default hours on first access.
    pub async fn get_or_create(&self, user_id: &str) -> DomainResult<Schedule> {
        if let Some(schedule) = self.repo.get_by_user(user_id).await? {
            return Ok(schedule);
        }

        self.repo.ensure_default(user_id).await?;
        self.repo.get_by_user(user_id).await?.ok_or_else(|| {
            DomainError::Internal(format!("Schedule for user {} vanished after upsert", user_id))
        })
    }

    /// Applies a partial update after validating every supplied time.
    pub async fn update(&self, user_id: &str, patch: SchedulePatch) -> DomainResult<Schedule> {
        validate_patch(&patch)?;

        let updated = self
            .repo
            .apply_patch(user_id, &patch)
            .await?
            .ok_or_else(|| DomainError::NotFound("Schedule not found".into()))?;

        info!(user_id, days = patch.days.len(), "Schedule updated");
        Ok(updated)
    }
}

/// Rejects the first malformed time, scanning days Monday→Sunday and start
/// before end within a day.
pub fn validate_patch(patch: &SchedulePatch) -> DomainResult<()> {
    let days = Weekday::ALL
        .iter()
        .flat_map(|day| patch.days.iter().filter(move |(d, _)| d == day));

    for (day, slot) in days {
        if let Some(start) = &slot.start_time {
            if !is_valid_time(start) {
                return Err(DomainError::Validation(format!(
                    "Invalid start time for {}",
                    day
                )));
            }
        }
        if let Some(end) = &slot.end_time {
            if !is_valid_time(end) {
                return Err(DomainError::Validation(format!(
                    "Invalid end time for {}",
                    day
                )));
            }
        }
    }

    Ok(())
}
