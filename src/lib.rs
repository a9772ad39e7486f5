//! # Work Scheduler
//!
//! REST backend for a personal weekly work-hours schedule and time-off
//! requests, with JWT authentication.
//!
//! ## Architecture
//!
//! - **domain**: records, enums and repository traits
//! - **application**: use-case services (identity, schedule, time off)
//! - **infrastructure**: password hashing, tokens, SeaORM persistence
//! - **interfaces**: axum REST API with Swagger documentation
//! - **shared**: error type, field validators, shutdown coordination
//! - **server**: runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, DatabaseConfig};
pub use interfaces::http::{create_api_router, AppState};
