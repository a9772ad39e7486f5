//! Authentication middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::common::ApiError;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};

/// Sent for every authentication failure, whatever the cause.
pub const NOT_AUTHORIZED: &str = "Not authorized";

/// Authentication error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header at all
    AuthRequired,
    /// Header present but not a valid bearer token
    InvalidToken,
}

/// Authentication state
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Caller identity taken from a verified token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
        }
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolves the caller from the request headers.
pub fn authenticate(
    request: &Request<Body>,
    jwt_config: &JwtConfig,
) -> Result<AuthenticatedUser, AuthError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::AuthRequired)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    let token = extract_token(auth_header).ok_or(AuthError::InvalidToken)?;

    verify_token(token, jwt_config)
        .map(AuthenticatedUser::from_claims)
        .map_err(|_| AuthError::InvalidToken)
}

/// JWT bearer authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&request, &auth_state.jwt_config) {
        Ok(user) => {
            debug!(user_id = %user.user_id, username = %user.username, "Request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(error) => auth_error_response(error),
    }
}

fn auth_error_response(error: AuthError) -> Response {
    match error {
        AuthError::AuthRequired => debug!("Rejected request without authorization header"),
        AuthError::InvalidToken => debug!("Rejected request with invalid bearer token"),
    }

    ApiError::new(StatusCode::UNAUTHORIZED, NOT_AUTHORIZED).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::jwt::create_token;

    fn config() -> JwtConfig {
        JwtConfig::new("middleware-secret", 1)
    }

    fn request(auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/schedule");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn missing_header_requires_auth() {
        let err = authenticate(&request(None), &config()).unwrap_err();
        assert_eq!(err, AuthError::AuthRequired);
    }

    #[test]
    fn non_bearer_or_bad_token_is_invalid() {
        for value in ["Basic abc", "Bearer ", "Bearer not-a-jwt", "token"] {
            let err = authenticate(&request(Some(value)), &config()).unwrap_err();
            assert_eq!(err, AuthError::InvalidToken, "{value}");
        }
    }

    #[test]
    fn valid_token_yields_user() {
        let token = create_token("user-1", "alice", &config()).unwrap();
        let header_value = format!("Bearer {}", token);

        let user = authenticate(&request(Some(&header_value)), &config()).unwrap();
        assert_eq!(user.user_id, "user-1");
        assert_eq!(user.username, "alice");
    }
}
