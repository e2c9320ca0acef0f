//! User domain entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User as returned to callers. The password hash is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
}

/// Validated input for creating a user. `password` is plaintext and only
/// lives until it is hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub phone: Option<String>,
}

/// Partial update requested by a caller.
///
/// `None` means "leave the column alone". `phone` is nullable, so
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub phone: Option<Option<String>>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.role.is_none()
            && self.phone.is_none()
    }
}

/// Row written on insert, with the password already hashed.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone: Option<String>,
}

impl UserRecord {
    /// The caller-facing view, reconstructed without a round trip.
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// [`UserChanges`] after hashing, as handed to the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<String>,
    pub phone: Option<Option<String>>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.role.is_none()
            && self.phone.is_none()
    }
}
