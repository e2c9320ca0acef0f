//! Tenant CRUD orchestration over a [`TenantRepository`].

use std::sync::Arc;
use uuid::Uuid;
use tracing::{info, debug, error};

use tenantry_shared::new_id;

use crate::domain::{NewTenant, Tenant, TenantChanges};
use crate::error::DomainError;
use crate::repositories::TenantRepository;

pub struct TenantService<R: TenantRepository + ?Sized> {
    tenant_repo: Arc<R>,
}

impl<R: TenantRepository + ?Sized> TenantService<R> {
    pub fn new(tenant_repo: Arc<R>) -> Self {
        Self { tenant_repo }
    }

    /// Insert, then read back so the store-assigned `created_at` is included.
    pub async fn create(&self, input: NewTenant) -> Result<Tenant, DomainError> {
        let id = new_id();
        self.tenant_repo.insert(&id, &input).await?;

        match self.tenant_repo.find_by_id(&id).await? {
            Some(tenant) => {
                info!("Tenant created: {}", tenant.id);
                Ok(tenant)
            }
            None => {
                error!("Tenant {} did not resolve after insert", id);
                Err(DomainError::DatabaseError(format!(
                    "tenant {} not found after insert",
                    id
                )))
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<Tenant>, DomainError> {
        self.tenant_repo.find_all().await
    }

    pub async fn get(&self, id: &Uuid) -> Result<Option<Tenant>, DomainError> {
        self.tenant_repo.find_by_id(id).await
    }

    pub async fn update(
        &self,
        id: &Uuid,
        changes: TenantChanges,
    ) -> Result<Option<Tenant>, DomainError> {
        let Some(existing) = self.tenant_repo.find_by_id(id).await? else {
            return Ok(None);
        };

        if changes.is_empty() {
            debug!("Empty update for tenant {}, nothing written", id);
            return Ok(Some(existing));
        }

        self.tenant_repo.update(id, &changes).await?;
        self.tenant_repo.find_by_id(id).await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        if self.tenant_repo.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.tenant_repo.delete(id).await?;

        let deleted = self.tenant_repo.find_by_id(id).await?.is_none();
        if deleted {
            info!("Tenant deleted: {}", id);
        }
        Ok(deleted)
    }
}
