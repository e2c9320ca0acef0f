//! Tenant repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{NewTenant, Tenant, TenantChanges};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantRepository: Send + Sync {
    /// `created_at` is assigned by the store, never by the caller.
    async fn insert(&self, id: &Uuid, tenant: &NewTenant) -> Result<(), DomainError>;
    async fn find_all(&self) -> Result<Vec<Tenant>, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Tenant>, DomainError>;
    async fn update(&self, id: &Uuid, changes: &TenantChanges) -> Result<(), DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
