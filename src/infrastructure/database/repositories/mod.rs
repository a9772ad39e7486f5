//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories.

pub mod schedule_repository;
pub mod time_off_repository;
pub mod user_repository;

pub use schedule_repository::ScheduleRepository;
pub use time_off_repository::TimeOffRepository;
pub use user_repository::UserRepository;
