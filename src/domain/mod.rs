//! Domain layer: records, enums and repository traits.

pub mod schedule;
pub mod time_off;
pub mod user;

pub use schedule::{
    DaySlot, DaySlotPatch, Schedule, ScheduleRepositoryInterface, SchedulePatch, WeeklyHours,
    Weekday,
};
pub use time_off::{TimeOff, TimeOffDraft, TimeOffRepositoryInterface, TimeOffStatus, TimeOffType};
pub use user::{CreateUserDto, User, UserRepositoryInterface};

pub use crate::shared::{DomainError, DomainResult};
