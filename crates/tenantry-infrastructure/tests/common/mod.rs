//! Shared setup for the Postgres integration tests.
//!
//! Tests only run when `TEST_DATABASE_URL` points at a disposable database;
//! otherwise every test returns early.

#![allow(dead_code)]

use sqlx::{Executor, PgPool};
use tenantry_infrastructure::create_pool;
use tenantry_shared::config::DatabaseSettings;

const SCHEMA: &str = r#"
BEGIN;
SELECT pg_advisory_xact_lock(727274);
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    full_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL,
    phone TEXT NULL
);
CREATE TABLE IF NOT EXISTS tenants (
    id UUID PRIMARY KEY,
    full_name TEXT NOT NULL,
    email TEXT NULL,
    phone TEXT NULL,
    date_of_birth DATE NULL,
    government_id TEXT NULL,
    emergency_contact TEXT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
COMMIT;
"#;

pub fn settings(max_connections: u32, acquire_timeout_secs: u64) -> Option<DatabaseSettings> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    Some(DatabaseSettings {
        url,
        max_connections,
        min_connections: 0,
        acquire_timeout_secs,
        idle_timeout_secs: None,
    })
}

/// `None` when no test database is configured.
pub async fn pool_with(max_connections: u32, acquire_timeout_secs: u64) -> Option<PgPool> {
    let settings = settings(max_connections, acquire_timeout_secs)?;
    let pool = create_pool(&settings).await.expect("test database unreachable");
    pool.execute(sqlx::raw_sql(SCHEMA)).await.expect("schema setup failed");
    Some(pool)
}

pub async fn pool() -> Option<PgPool> {
    pool_with(5, 3).await
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}+{}@example.com", prefix, uuid::Uuid::new_v4().simple())
}
