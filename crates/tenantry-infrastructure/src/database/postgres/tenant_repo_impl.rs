// ============================================================================
// Tenantry Infrastructure - PostgreSQL Tenant Repository
// File: crates/tenantry-infrastructure/src/database/postgres/tenant_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use tracing::{error, warn};

use tenantry_core::domain::{EmergencyContact, NewTenant, Tenant, TenantChanges};
use tenantry_core::error::DomainError;
use tenantry_core::repositories::TenantRepository;

use crate::database::executor::QueryExecutor;
use crate::database::statement::{Column, Statement, UpdateBuilder};

const SELECT_TENANTS: &str = "SELECT id, full_name, email, phone, date_of_birth, government_id, \
     emergency_contact, created_at FROM tenants";

/// Updatable columns of `tenants`. `id` and `created_at` are never written
/// after insert.
#[derive(Debug, Clone, Copy)]
pub enum TenantColumn {
    FullName,
    Email,
    Phone,
    DateOfBirth,
    GovernmentId,
    EmergencyContact,
}

impl Column for TenantColumn {
    const TABLE: &'static str = "tenants";

    fn name(self) -> &'static str {
        match self {
            TenantColumn::FullName => "full_name",
            TenantColumn::Email => "email",
            TenantColumn::Phone => "phone",
            TenantColumn::DateOfBirth => "date_of_birth",
            TenantColumn::GovernmentId => "government_id",
            TenantColumn::EmergencyContact => "emergency_contact",
        }
    }
}

pub struct PgTenantRepository {
    executor: QueryExecutor,
}

impl PgTenantRepository {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct TenantRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub government_id: Option<String>,
    pub emergency_contact: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Tenant {
            emergency_contact: decode_contact(row.id, row.emergency_contact.as_deref()),
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            date_of_birth: row.date_of_birth,
            government_id: row.government_id,
            created_at: row.created_at,
        }
    }
}

fn encode_contact(contact: Option<&EmergencyContact>) -> Result<Option<String>, DomainError> {
    contact
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| DomainError::InternalError(format!("emergency_contact encoding: {}", e)))
}

/// Stored text that does not parse as a JSON object reads back as absent.
fn decode_contact(id: Uuid, raw: Option<&str>) -> Option<EmergencyContact> {
    let raw = raw.filter(|s| !s.trim().is_empty())?;
    match serde_json::from_str::<EmergencyContact>(raw) {
        Ok(contact) => Some(contact),
        Err(e) => {
            warn!("Unreadable emergency_contact on tenant {}: {}", id, e);
            None
        }
    }
}

fn insert_statement(id: &Uuid, tenant: &NewTenant) -> Result<Statement, DomainError> {
    Ok(Statement::new(
        "INSERT INTO tenants \
         (id, full_name, email, phone, date_of_birth, government_id, emergency_contact) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(*id)
    .bind(tenant.full_name.clone())
    .bind(tenant.email.clone())
    .bind(tenant.phone.clone())
    .bind(tenant.date_of_birth)
    .bind(tenant.government_id.clone())
    .bind(encode_contact(tenant.emergency_contact.as_ref())?))
}

fn find_all_statement() -> Statement {
    Statement::new(format!("{} ORDER BY created_at, id", SELECT_TENANTS))
}

fn find_by_id_statement(id: &Uuid) -> Statement {
    Statement::new(format!("{} WHERE id = $1", SELECT_TENANTS)).bind(*id)
}

fn update_statement(id: &Uuid, changes: &TenantChanges) -> Result<Option<Statement>, DomainError> {
    let emergency_contact = match &changes.emergency_contact {
        Some(contact) => Some(encode_contact(contact.as_ref())?),
        None => None,
    };

    Ok(UpdateBuilder::<TenantColumn>::new()
        .set_present(TenantColumn::FullName, changes.full_name.clone())
        .set_present(TenantColumn::Email, changes.email.clone())
        .set_present(TenantColumn::Phone, changes.phone.clone())
        .set_present(TenantColumn::DateOfBirth, changes.date_of_birth)
        .set_present(TenantColumn::GovernmentId, changes.government_id.clone())
        .set_present(TenantColumn::EmergencyContact, emergency_contact)
        .build(*id))
}

fn delete_statement(id: &Uuid) -> Statement {
    Statement::new("DELETE FROM tenants WHERE id = $1").bind(*id)
}

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn insert(&self, id: &Uuid, tenant: &NewTenant) -> Result<(), DomainError> {
        let statement = insert_statement(id, tenant)?;
        self.executor
            .run_command(&statement)
            .await
            .map_err(|e| {
                error!("Database error creating tenant: {}", e);
                DomainError::from(e)
            })?;

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Tenant>, DomainError> {
        let rows: Vec<TenantRow> = self
            .executor
            .fetch_all(&find_all_statement())
            .await
            .map_err(|e| {
                error!("Database error listing tenants: {}", e);
                DomainError::from(e)
            })?;

        Ok(rows.into_iter().map(Tenant::from).collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Tenant>, DomainError> {
        let row: Option<TenantRow> = self
            .executor
            .fetch_optional(&find_by_id_statement(id))
            .await
            .map_err(|e| {
                error!("Database error finding tenant by id: {}", e);
                DomainError::from(e)
            })?;

        Ok(row.map(|r| r.into()))
    }

    async fn update(&self, id: &Uuid, changes: &TenantChanges) -> Result<(), DomainError> {
        let Some(statement) = update_statement(id, changes)? else {
            return Ok(());
        };

        self.executor
            .run_command(&statement)
            .await
            .map_err(|e| {
                error!("Database error updating tenant: {}", e);
                DomainError::from(e)
            })?;

        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.executor
            .run_command(&delete_statement(id))
            .await
            .map_err(|e| {
                error!("Database error deleting tenant: {}", e);
                DomainError::from(e)
            })?;

        Ok(())
    }
}
