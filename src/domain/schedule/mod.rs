//! Schedule aggregate
//!
//! One weekly work-hours template per user.

pub mod model;
pub mod repository;

pub use model::{
    DaySlot, DaySlotPatch, Schedule, SchedulePatch, WeeklyHours, Weekday, DEFAULT_END_TIME,
    DEFAULT_START_TIME,
};

pub use repository::ScheduleRepositoryInterface;
