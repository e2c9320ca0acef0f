// ============================================================================
// Tenantry Infrastructure - PostgreSQL User Repository
// File: crates/tenantry-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;
use tracing::error;

use tenantry_core::domain::{User, UserRecord, UserUpdate};
use tenantry_core::error::DomainError;
use tenantry_core::repositories::UserRepository;

use crate::database::executor::QueryExecutor;
use crate::database::statement::{Column, SqlParam, Statement, UpdateBuilder};

const SELECT_USERS: &str = "SELECT id, full_name, email, role, phone FROM users";

/// Updatable columns of `users`. `id` is never updated.
#[derive(Debug, Clone, Copy)]
pub enum UserColumn {
    FullName,
    Email,
    PasswordHash,
    Role,
    Phone,
}

impl Column for UserColumn {
    const TABLE: &'static str = "users";

    fn name(self) -> &'static str {
        match self {
            UserColumn::FullName => "full_name",
            UserColumn::Email => "email",
            UserColumn::PasswordHash => "password_hash",
            UserColumn::Role => "role",
            UserColumn::Phone => "phone",
        }
    }
}

pub struct PgUserRepository {
    executor: QueryExecutor,
}

impl PgUserRepository {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            role: row.role,
            phone: row.phone,
        }
    }
}

fn insert_statement(user: &UserRecord) -> Statement {
    Statement::new(
        "INSERT INTO users (id, full_name, email, password_hash, role, phone) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(user.id)
    .bind(user.full_name.clone())
    .bind(user.email.clone())
    .bind(SqlParam::Secret(user.password_hash.clone()))
    .bind(user.role.clone())
    .bind(user.phone.clone())
}

fn find_all_statement() -> Statement {
    Statement::new(format!("{} ORDER BY full_name, id", SELECT_USERS))
}

fn find_by_id_statement(id: &Uuid) -> Statement {
    Statement::new(format!("{} WHERE id = $1", SELECT_USERS)).bind(*id)
}

fn update_statement(id: &Uuid, changes: &UserUpdate) -> Option<Statement> {
    UpdateBuilder::<UserColumn>::new()
        .set_present(UserColumn::FullName, changes.full_name.clone())
        .set_present(UserColumn::Email, changes.email.clone())
        .set_present(
            UserColumn::PasswordHash,
            changes.password_hash.clone().map(SqlParam::Secret),
        )
        .set_present(UserColumn::Role, changes.role.clone())
        .set_present(UserColumn::Phone, changes.phone.clone())
        .build(*id)
}

fn delete_statement(id: &Uuid) -> Statement {
    Statement::new("DELETE FROM users WHERE id = $1").bind(*id)
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: &UserRecord) -> Result<(), DomainError> {
        self.executor
            .run_command(&insert_statement(user))
            .await
            .map_err(|e| {
                error!("Database error creating user: {}", e);
                DomainError::from(e)
            })?;

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = self
            .executor
            .fetch_all(&find_all_statement())
            .await
            .map_err(|e| {
                error!("Database error listing users: {}", e);
                DomainError::from(e)
            })?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = self
            .executor
            .fetch_optional(&find_by_id_statement(id))
            .await
            .map_err(|e| {
                error!("Database error finding user by id: {}", e);
                DomainError::from(e)
            })?;

        Ok(row.map(|r| r.into()))
    }

    async fn update(&self, id: &Uuid, changes: &UserUpdate) -> Result<(), DomainError> {
        let Some(statement) = update_statement(id, changes) else {
            return Ok(());
        };

        self.executor
            .run_command(&statement)
            .await
            .map_err(|e| {
                error!("Database error updating user: {}", e);
                DomainError::from(e)
            })?;

        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.executor
            .run_command(&delete_statement(id))
            .await
            .map_err(|e| {
                error!("Database error deleting user: {}", e);
                DomainError::from(e)
            })?;

        Ok(())
    }
}
