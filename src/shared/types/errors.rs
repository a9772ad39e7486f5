use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Client-correctable input problem (missing field, bad format, rule violation).
    #[error("{0}")]
    Validation(String),

    /// Duplicate username or email.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    /// Record absent, or present but owned by another user.
    #[error("{0}")]
    NotFound(String),

    /// Unexpected persistence or runtime failure. The detail is logged, never sent.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Result type for domain and application operations
pub type DomainResult<T> = Result<T, DomainError>;
