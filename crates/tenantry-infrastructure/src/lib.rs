//! # Tenantry Infrastructure
//! 
//! PostgreSQL adapters: connection pool, query executor, and repository
//! implementations for the core ports.

pub mod database;

pub use database::{
    create_pool, DatabaseError, FetchMode, PgTenantRepository, PgUserRepository, QueryExecutor,
    QueryOutcome, Statement,
};
