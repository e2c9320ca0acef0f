// ============================================================================
// Tenantry Core - User Service
// File: crates/tenantry-core/src/services/user_service.rs
// ============================================================================
//! User CRUD orchestration: id generation, hashing, partial updates and
//! self-verifying deletes over a [`UserRepository`].

use std::sync::Arc;
use uuid::Uuid;
use tracing::{info, debug};

use tenantry_security::PasswordService;
use tenantry_shared::{new_id, utils::mask_email};

use crate::domain::{NewUser, User, UserChanges, UserRecord, UserUpdate};
use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct UserService<R: UserRepository + ?Sized> {
    user_repo: Arc<R>,
}

/// Argon2 is CPU-intensive, so it runs on the blocking pool.
async fn hash_password(password: String) -> Result<String, DomainError> {
    tokio::task::spawn_blocking(move || PasswordService::hash(&password))
        .await
        .map_err(|e| DomainError::PasswordHashError(e.to_string()))?
        .map_err(DomainError::from)
}

impl<R: UserRepository + ?Sized> UserService<R> {
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    /// Create a user. The returned record is rebuilt from the input, not
    /// re-read from storage.
    pub async fn create(&self, input: NewUser) -> Result<User, DomainError> {
        let password_hash = hash_password(input.password).await?;
        let record = UserRecord {
            id: new_id(),
            password_hash,
            full_name: input.full_name,
            email: input.email,
            role: input.role,
            phone: input.phone,
        };

        self.user_repo.insert(&record).await?;

        info!("User created: {} ({})", record.id, mask_email(&record.email));
        Ok(record.to_user())
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.user_repo.find_all().await
    }

    pub async fn get(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        self.user_repo.find_by_id(id).await
    }

    /// Apply only the supplied fields. `Ok(None)` when the id is unknown;
    /// with no fields supplied nothing is written and the current record
    /// comes back unchanged.
    pub async fn update(
        &self,
        id: &Uuid,
        changes: UserChanges,
    ) -> Result<Option<User>, DomainError> {
        let Some(existing) = self.user_repo.find_by_id(id).await? else {
            return Ok(None);
        };

        if changes.is_empty() {
            debug!("Empty update for user {}, nothing written", id);
            return Ok(Some(existing));
        }

        let password_hash = match changes.password {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        let update = UserUpdate {
            full_name: changes.full_name,
            email: changes.email,
            password_hash,
            role: changes.role,
            phone: changes.phone,
        };

        self.user_repo.update(id, &update).await?;
        self.user_repo.find_by_id(id).await
    }

    /// `true` iff the user existed and no longer resolves after the delete.
    pub async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        if self.user_repo.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.user_repo.delete(id).await?;

        let deleted = self.user_repo.find_by_id(id).await?.is_none();
        if deleted {
            info!("User deleted: {}", id);
        }
        Ok(deleted)
    }
}
