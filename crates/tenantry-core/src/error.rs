//! Domain errors
//!
//! A missing record is never an error here: lookups return `Option` and
//! deletes return `bool`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<tenantry_security::PasswordError> for DomainError {
    fn from(err: tenantry_security::PasswordError) -> Self {
        DomainError::PasswordHashError(err.to_string())
    }
}
