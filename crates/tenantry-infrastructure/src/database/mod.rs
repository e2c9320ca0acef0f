//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod error;
pub mod executor;
pub mod statement;
pub mod postgres;

pub use connection::{create_pool, pool_options};
pub use error::DatabaseError;
pub use executor::{FetchMode, QueryExecutor, QueryOutcome};
pub use statement::{Column, SqlParam, Statement, UpdateBuilder};
pub use postgres::{PgTenantRepository, PgUserRepository};
