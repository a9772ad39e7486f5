//! Time-off request use-cases

pub mod service;

pub use service::{validate_time_off, TimeOffInput, TimeOffService};
