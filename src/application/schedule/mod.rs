//! Weekly schedule use-cases

pub mod service;

pub use service::ScheduleService;
