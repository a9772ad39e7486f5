use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, UpdateResult};
use tracing::debug;

use super::user_repository::db_err;
use crate::domain::{
    DaySlot, DomainResult, Schedule, SchedulePatch, ScheduleRepositoryInterface, WeeklyHours,
    Weekday,
};
use crate::infrastructure::database::entities::schedule;

pub struct ScheduleRepository {
    db: DatabaseConnection,
}

impl ScheduleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn slot(start: String, end: String) -> DaySlot {
    DaySlot {
        start_time: start,
        end_time: end,
    }
}

fn schedule_model_to_domain(model: schedule::Model) -> Schedule {
    Schedule {
        id: model.id,
        user_id: model.user_id,
        hours: WeeklyHours {
            monday: slot(model.monday_start, model.monday_end),
            tuesday: slot(model.tuesday_start, model.tuesday_end),
            wednesday: slot(model.wednesday_start, model.wednesday_end),
            thursday: slot(model.thursday_start, model.thursday_end),
            friday: slot(model.friday_start, model.friday_end),
            saturday: slot(model.saturday_start, model.saturday_end),
            sunday: slot(model.sunday_start, model.sunday_end),
        },
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn set_hours(active: &mut schedule::ActiveModel, hours: &WeeklyHours) {
    active.monday_start = Set(hours.monday.start_time.clone());
    active.monday_end = Set(hours.monday.end_time.clone());
    active.tuesday_start = Set(hours.tuesday.start_time.clone());
    active.tuesday_end = Set(hours.tuesday.end_time.clone());
    active.wednesday_start = Set(hours.wednesday.start_time.clone());
    active.wednesday_end = Set(hours.wednesday.end_time.clone());
    active.thursday_start = Set(hours.thursday.start_time.clone());
    active.thursday_end = Set(hours.thursday.end_time.clone());
    active.friday_start = Set(hours.friday.start_time.clone());
    active.friday_end = Set(hours.friday.end_time.clone());
    active.saturday_start = Set(hours.saturday.start_time.clone());
    active.saturday_end = Set(hours.saturday.end_time.clone());
    active.sunday_start = Set(hours.sunday.start_time.clone());
    active.sunday_end = Set(hours.sunday.end_time.clone());
}

fn day_columns(day: Weekday) -> (schedule::Column, schedule::Column) {
    use schedule::Column;
    match day {
        Weekday::Monday => (Column::MondayStart, Column::MondayEnd),
        Weekday::Tuesday => (Column::TuesdayStart, Column::TuesdayEnd),
        Weekday::Wednesday => (Column::WednesdayStart, Column::WednesdayEnd),
        Weekday::Thursday => (Column::ThursdayStart, Column::ThursdayEnd),
        Weekday::Friday => (Column::FridayStart, Column::FridayEnd),
        Weekday::Saturday => (Column::SaturdayStart, Column::SaturdayEnd),
        Weekday::Sunday => (Column::SundayStart, Column::SundayEnd),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ScheduleRepositoryInterface for ScheduleRepository {
    async fn ensure_default(&self, user_id: &str) -> DomainResult<()> {
        let now = Utc::now();
        let mut active = schedule::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        set_hours(&mut active, &WeeklyHours::default());

        // INSERT .. ON CONFLICT (user_id) DO NOTHING: concurrent callers
        // converge on whichever row landed first.
        let inserted = schedule::Entity::insert(active)
            .on_conflict(
                OnConflict::column(schedule::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;

        if inserted > 0 {
            debug!(user_id, "Default schedule created");
        }
        Ok(())
    }

    async fn get_by_user(&self, user_id: &str) -> DomainResult<Option<Schedule>> {
        let model = schedule::Entity::find()
            .filter(schedule::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(schedule_model_to_domain))
    }

    async fn apply_patch(
        &self,
        user_id: &str,
        patch: &SchedulePatch,
    ) -> DomainResult<Option<Schedule>> {
        // Single UPDATE touching only the supplied columns, so concurrent
        // patches to different days both land.
        let mut update = schedule::Entity::update_many()
            .col_expr(schedule::Column::UpdatedAt, Expr::value(Utc::now()));

        for (day, slot) in &patch.days {
            let (start_col, end_col) = day_columns(*day);
            if let Some(start) = &slot.start_time {
                update = update.col_expr(start_col, Expr::value(start.trim().to_string()));
            }
            if let Some(end) = &slot.end_time {
                update = update.col_expr(end_col, Expr::value(end.trim().to_string()));
            }
        }

        let result: UpdateResult = update
            .filter(schedule::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_by_user(user_id).await
    }
}
