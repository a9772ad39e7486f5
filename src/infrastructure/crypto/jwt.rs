//! JWT session token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Issuer claim stamped into every token
pub const TOKEN_ISSUER: &str = "work-scheduler";

/// Default token lifetime in hours
pub const DEFAULT_EXPIRATION_HOURS: i64 = 24;

/// Longest accepted token lifetime (one year)
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

/// JWT configuration
///
/// Built once at startup from `AppConfig`. Has no `Default`: the signing
/// key always comes from the caller.
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
            issuer: TOKEN_ISSUER.to_string(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
}

impl TokenClaims {
    pub fn new(user_id: &str, username: &str, config: &JwtConfig) -> Result<Self, TokenError> {
        let now = Utc::now();
        let exp = Duration::try_hours(config.expiration_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(TokenError::Expiration(config.expiration_hours))?;

        Ok(Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        })
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, malformed, wrong issuer or expired. Callers must not
    /// distinguish between these.
    #[error("Invalid authentication token")]
    InvalidToken,

    #[error("Token lifetime of {0} hours is out of range")]
    Expiration(i64),

    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Create a signed token for a user
pub fn create_token(
    user_id: &str,
    username: &str,
    config: &JwtConfig,
) -> Result<String, TokenError> {
    let claims = TokenClaims::new(user_id, username, config)?;

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?)
}

/// Verify and decode a token
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);
    validation.leeway = 0;

    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!(reason = ?e.kind(), "Token rejected");
        TokenError::InvalidToken
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig::new("test-secret", DEFAULT_EXPIRATION_HOURS)
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = config();
        let token = create_token("user-123", "testuser", &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.username, "testuser");
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_invalid_token() {
        let result = verify_token("invalid-token", &config());
        assert!(matches!(result, Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_expired_token() {
        let config = config();
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: "user-123".into(),
            username: "testuser".into(),
            exp: now - 3600,
            iat: now - 25 * 3600,
            iss: config.issuer.clone(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            verify_token(&token, &config),
            Err(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_token() {
        let config = config();
        let token = create_token("user-123", "testuser", &config).unwrap();

        // Swap the payload for one claiming a different subject.
        let other = create_token("user-456", "other", &config).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        parts[1] = other_parts[1];
        let forged = parts.join(".");

        assert!(matches!(
            verify_token(&forged, &config),
            Err(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret() {
        let token = create_token("user-123", "testuser", &config()).unwrap();
        let other = JwtConfig::new("another-secret", DEFAULT_EXPIRATION_HOURS);

        assert!(matches!(
            verify_token(&token, &other),
            Err(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn test_unrepresentable_lifetime_is_an_error() {
        let config = JwtConfig::new("test-secret", i64::MAX);
        assert!(matches!(
            create_token("user-123", "testuser", &config),
            Err(TokenError::Expiration(i64::MAX))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("test-secret"));
    }
}
