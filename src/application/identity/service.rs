//! Identity service: registration and login
//!
//! HTTP handlers are thin wrappers that delegate here.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, ScheduleRepositoryInterface, User,
    UserRepositoryInterface,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Shared by unknown-username and wrong-password failures.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Token plus the account it was issued for
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub user: User,
}

/// User service — orchestrates the identity use-cases.
///
/// Generic over the repositories so it stays decoupled from the concrete
/// persistence layer.
pub struct UserService<U: UserRepositoryInterface, S: ScheduleRepositoryInterface> {
    users: Arc<U>,
    schedules: Arc<S>,
    jwt_config: JwtConfig,
    password_cost: u32,
}

impl<U: UserRepositoryInterface, S: ScheduleRepositoryInterface> UserService<U, S> {
    pub fn new(users: Arc<U>, schedules: Arc<S>, jwt_config: JwtConfig, password_cost: u32) -> Self {
        Self {
            users,
            schedules,
            jwt_config,
            password_cost,
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new user, provision their default schedule and issue a token.
    ///
    /// The schedule write is not rolled back against the user write: if it
    /// fails the account still exists and the schedule is created lazily on
    /// first fetch.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<AuthResult> {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(DomainError::validation("Please provide all required fields"));
        }

        if self.users.get_user_by_username(username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".into()));
        }
        if self.users.get_user_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        let password_hash = hash_password(password, self.password_cost)
            .await
            .map_err(DomainError::internal)?;

        let user = self
            .users
            .create_user(CreateUserDto {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        if let Err(e) = self.schedules.ensure_default(&user.id).await {
            error!(user_id = %user.id, error = %e, "Failed to create default schedule");
        }

        let token = self.issue_token(&user)?;

        metrics::counter!("auth_attempts_total", "action" => "register", "outcome" => "success")
            .increment(1);
        info!(user_id = %user.id, username = %user.username, "New user registered");
        Ok(AuthResult { token, user })
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by username + password and issue a token.
    ///
    /// Unknown usernames and wrong passwords fail with the same message.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<AuthResult> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(DomainError::validation(
                "Please provide username and password",
            ));
        }

        let Some(user) = self.users.get_user_by_username(username).await? else {
            return Err(self.rejected_login("unknown username"));
        };

        // A corrupt stored hash is treated like a wrong password.
        let valid = match verify_password(password, &user.password_hash).await {
            Ok(valid) => valid,
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Password verification failed");
                false
            }
        };
        if !valid {
            return Err(self.rejected_login("wrong password"));
        }

        let token = self.issue_token(&user)?;

        metrics::counter!("auth_attempts_total", "action" => "login", "outcome" => "success")
            .increment(1);
        info!(user_id = %user.id, "User logged in");
        Ok(AuthResult { token, user })
    }

    fn rejected_login(&self, reason: &'static str) -> DomainError {
        metrics::counter!("auth_attempts_total", "action" => "login", "outcome" => "rejected")
            .increment(1);
        info!(reason, "Login rejected");
        DomainError::Validation(INVALID_CREDENTIALS.into())
    }

    fn issue_token(&self, user: &User) -> DomainResult<String> {
        create_token(&user.id, &user.username, &self.jwt_config).map_err(DomainError::internal)
    }
}
