//! Application layer: use-case services over the domain repositories

pub mod identity;
pub mod schedule;
pub mod time_off;

pub use identity::{AuthResult, UserService};
pub use schedule::ScheduleService;
pub use time_off::{TimeOffInput, TimeOffService};
