//! Time-off aggregate
//!
//! Vacation, day-off, sick-leave and other absence requests.

pub mod model;
pub mod repository;

pub use model::{TimeOff, TimeOffDraft, TimeOffStatus, TimeOffType};

pub use repository::TimeOffRepositoryInterface;
