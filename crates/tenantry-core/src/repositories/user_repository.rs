//! User repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{User, UserRecord, UserUpdate};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: &UserRecord) -> Result<(), DomainError>;
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError>;
    /// Writes only the columns present in `changes`. Callers must not pass
    /// an empty update.
    async fn update(&self, id: &Uuid, changes: &UserUpdate) -> Result<(), DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
