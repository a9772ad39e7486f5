//! Identity bounded context: registration and login

pub mod service;

pub use service::{AuthResult, UserService, INVALID_CREDENTIALS};
