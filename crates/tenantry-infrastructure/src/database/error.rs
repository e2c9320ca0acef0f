//! Database-layer error type

use thiserror::Error;
use tenantry_core::error::DomainError;

use super::statement::Statement;

/// Any failure while running a statement: acquiring a connection,
/// preparing, executing, committing or decoding a row.
///
/// Carries the statement text and rendered parameters for diagnostics.
/// Secret parameters are already masked by [`Statement::rendered_params`].
#[derive(Debug, Error)]
#[error("Database error: {source} (query={statement:?}, params={params:?})")]
pub struct DatabaseError {
    statement: String,
    params: Vec<String>,
    #[source]
    source: sqlx::Error,
}

impl DatabaseError {
    pub fn new(statement: &Statement, source: sqlx::Error) -> Self {
        Self {
            statement: statement.sql().to_string(),
            params: statement.rendered_params(),
            source,
        }
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The pool stayed exhausted for the whole acquire timeout.
    pub fn is_pool_timeout(&self) -> bool {
        matches!(self.source, sqlx::Error::PoolTimedOut)
    }
}

impl From<DatabaseError> for DomainError {
    fn from(err: DatabaseError) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}
