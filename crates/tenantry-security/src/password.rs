//! Password hashing with Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    EmptyInput,
    #[error("Hash error: {0}")]
    HashError(String),
}

/// One-way credential transform. Produces PHC strings
/// (`$argon2id$v=19$...`) carrying their own salt and parameters.
pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::EmptyInput);
        }
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is malformed.
    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::HashError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_and_verifiable() {
        let first = PasswordService::hash("Password123!").unwrap();
        let second = PasswordService::hash("Password123!").unwrap();

        assert!(first.starts_with("$argon2"));
        assert_ne!(first, second);
        assert!(!first.contains("Password123!"));
        assert!(PasswordService::verify("Password123!", &first).unwrap());
        assert!(PasswordService::verify("Password123!", &second).unwrap());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = PasswordService::hash("correct horse").unwrap();
        assert!(!PasswordService::verify("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(PasswordService::hash(""), Err(PasswordError::EmptyInput)));
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(PasswordService::verify("anything", "not-a-phc-string").is_err());
    }
}
