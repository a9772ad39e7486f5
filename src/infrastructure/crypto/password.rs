//! Password hashing utilities
//!
//! bcrypt is CPU-bound, so both directions run on tokio's blocking pool.

use thiserror::Error;

pub use bcrypt::DEFAULT_COST;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Hash a password using bcrypt with a fresh random salt
pub async fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hashed)
}

/// Verify a password against a stored hash
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let password = "secure_password_123";
        let hashed = hash_password(password, bcrypt::DEFAULT_COST).await.unwrap();

        assert_ne!(hashed, password);
        assert!(verify_password(password, &hashed).await.unwrap());
        assert!(!verify_password("wrong_password", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let first = hash_password("same", 4).await.unwrap();
        let second = hash_password("same", 4).await.unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same", &second).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").await.is_err());
    }
}
