//! Authentication helpers
//!
//! Password hashing and credential validation shared by user stores.

use crate::{QuizError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::error;

/// Longest username accepted at registration
pub const MAX_USERNAME_LEN: usize = 64;

/// Hash a plaintext password into a salted PHC string
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            QuizError::HashError(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Check a plaintext password against a stored PHC string
pub fn verify_password(plain: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        QuizError::HashError(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Reject credentials that can never be registered
pub fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(QuizError::InvalidCredentials(
            "Username must not be empty".to_string(),
        ));
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(QuizError::InvalidCredentials(format!(
            "Username longer than {} characters",
            MAX_USERNAME_LEN
        )));
    }
    if password.is_empty() {
        return Err(QuizError::InvalidCredentials(
            "Password must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("s3cret").expect("hashing should succeed");
        assert_ne!(hash, "s3cret");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret", &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("right").expect("hashing should succeed");
        assert!(!verify_password("wrong", &hash).expect("verify should not error"));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "plaintext-from-old-db").unwrap_err();
        assert!(matches!(err, QuizError::HashError(_)));
    }

    #[test]
    fn credential_validation() {
        assert!(validate_credentials("alice", "pw").is_ok());
        assert!(matches!(
            validate_credentials("", "pw"),
            Err(QuizError::InvalidCredentials(_))
        ));
        assert!(validate_credentials("   ", "pw").is_err());
        assert!(validate_credentials("alice", "").is_err());
        assert!(validate_credentials(&"x".repeat(MAX_USERNAME_LEN + 1), "pw").is_err());
    }
}
