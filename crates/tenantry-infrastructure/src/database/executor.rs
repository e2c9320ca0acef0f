// ============================================================================
// Tenantry Infrastructure - Query Executor
// File: crates/tenantry-infrastructure/src/database/executor.rs
// ============================================================================
//! Runs one statement per call on a pooled connection.
//!
//! Contract for every call:
//! 1. acquire a connection (released when the handle drops, on every path)
//! 2. open a transaction, prepare, bind parameters
//! 3. the statement produces rows iff its prepared description has columns
//! 4. read the primary result set per [`FetchMode`], then drain whatever
//!    the driver still reports; drain errors are logged and swallowed
//! 5. commit only statements that produced no rows; row-producing ones are
//!    rolled back, so writes must not use `RETURNING`

use futures::{StreamExt, TryStreamExt};
use sqlx::postgres::{PgQueryResult, PgRow};
use sqlx::{Connection, Either, Executor, FromRow, PgPool, Postgres, Statement as _, Transaction};
use tracing::{debug, warn};

use super::error::DatabaseError;
use super::statement::Statement;

/// How many rows of the primary result set the caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    None,
    One,
    All,
}

#[derive(Debug)]
pub enum QueryOutcome {
    /// The statement produced a result set; holds 0, 1 or all of its rows
    /// depending on the [`FetchMode`].
    Rows(Vec<PgRow>),
    /// The statement produced no result set and was committed.
    Completed { rows_affected: u64 },
}

#[derive(Clone)]
pub struct QueryExecutor {
    pool: PgPool,
}

impl QueryExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn execute(
        &self,
        statement: &Statement,
        fetch: FetchMode,
    ) -> Result<QueryOutcome, DatabaseError> {
        debug!(
            sql = statement.sql(),
            params = statement.params().len(),
            ?fetch,
            "Executing statement"
        );

        self.run(statement, fetch)
            .await
            .map_err(|e| DatabaseError::new(statement, e))
    }

    /// First row of the result set, if any.
    pub async fn fetch_optional<T>(
        &self,
        statement: &Statement,
    ) -> Result<Option<T>, DatabaseError>
    where
        T: for<'r> FromRow<'r, PgRow>,
    {
        match self.execute(statement, FetchMode::One).await? {
            QueryOutcome::Rows(rows) => rows
                .first()
                .map(|row| T::from_row(row))
                .transpose()
                .map_err(|e| DatabaseError::new(statement, e)),
            QueryOutcome::Completed { .. } => Ok(None),
        }
    }

    pub async fn fetch_all<T>(&self, statement: &Statement) -> Result<Vec<T>, DatabaseError>
    where
        T: for<'r> FromRow<'r, PgRow>,
    {
        match self.execute(statement, FetchMode::All).await? {
            QueryOutcome::Rows(rows) => rows
                .iter()
                .map(|row| T::from_row(row))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| DatabaseError::new(statement, e)),
            QueryOutcome::Completed { .. } => Ok(Vec::new()),
        }
    }

    /// Runs a statement for its effect. Returns the rows affected.
    pub async fn run_command(&self, statement: &Statement) -> Result<u64, DatabaseError> {
        match self.execute(statement, FetchMode::None).await? {
            QueryOutcome::Completed { rows_affected } => Ok(rows_affected),
            QueryOutcome::Rows(_) => Ok(0),
        }
    }

    async fn run(
        &self,
        statement: &Statement,
        fetch: FetchMode,
    ) -> Result<QueryOutcome, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let prepared = (&mut *tx).prepare(statement.sql()).await?;
        let produces_rows = !prepared.columns().is_empty();
        let arguments = statement.arguments().map_err(sqlx::Error::Encode)?;

        let (rows, rows_affected) = {
            let mut results = (&mut *tx).fetch_many(prepared.query_with(arguments));
            let primary = read_primary(&mut results, fetch).await?;
            drain(&mut results, statement).await;
            primary
        };

        if produces_rows {
            finish_read(tx).await;
            Ok(QueryOutcome::Rows(rows))
        } else {
            tx.commit().await?;
            Ok(QueryOutcome::Completed { rows_affected })
        }
    }
}

/// Reads up to the end of the first result set. Rows beyond what `fetch`
/// asks for are consumed and dropped.
async fn read_primary<S>(
    results: &mut S,
    fetch: FetchMode,
) -> Result<(Vec<PgRow>, u64), sqlx::Error>
where
    S: futures::Stream<Item = Result<Either<PgQueryResult, PgRow>, sqlx::Error>> + Unpin,
{
    let mut rows = Vec::new();
    while let Some(item) = results.try_next().await? {
        match item {
            Either::Left(done) => return Ok((rows, done.rows_affected())),
            Either::Right(row) => {
                let wanted = match fetch {
                    FetchMode::None => false,
                    FetchMode::One => rows.is_empty(),
                    FetchMode::All => true,
                };
                if wanted {
                    rows.push(row);
                }
            }
        }
    }
    Ok((rows, 0))
}

/// Consumes and discards any further result sets so the connection goes
/// back to the pool with nothing pending.
async fn drain<S>(results: &mut S, statement: &Statement)
where
    S: futures::Stream<Item = Result<Either<PgQueryResult, PgRow>, sqlx::Error>> + Unpin,
{
    let mut discarded = 0usize;
    while let Some(item) = results.next().await {
        match item {
            Ok(_) => discarded += 1,
            Err(e) => {
                warn!(sql = statement.sql(), "Ignoring error while draining results: {}", e);
                break;
            }
        }
    }
    if discarded > 0 {
        debug!(sql = statement.sql(), discarded, "Drained extra results");
    }
}

/// Reads have nothing to commit. A failed rollback is logged only; the pool
/// discards connections it cannot reset.
async fn finish_read(tx: Transaction<'_, Postgres>) {
    if let Err(e) = tx.rollback().await {
        warn!("Rollback after read failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    type Item = Result<Either<PgQueryResult, PgRow>, sqlx::Error>;

    fn done() -> Item {
        Ok(Either::Left(PgQueryResult::default()))
    }

    fn failed() -> Item {
        Err(sqlx::Error::WorkerCrashed)
    }

    #[tokio::test]
    async fn test_primary_stops_at_end_of_first_result_set() {
        let mut results = stream::iter(vec![done(), failed()]);
        let (rows, affected) = read_primary(&mut results, FetchMode::All).await.unwrap();

        assert!(rows.is_empty());
        assert_eq!(affected, 0);
        // The secondary set is left for the drain.
        assert!(results.next().await.is_some());
    }

    #[tokio::test]
    async fn test_primary_error_propagates() {
        let mut results = stream::iter(vec![failed()]);
        assert!(read_primary(&mut results, FetchMode::One).await.is_err());
    }

    #[tokio::test]
    async fn test_drain_swallows_errors() {
        let mut results = stream::iter(vec![failed(), done()]);
        drain(&mut results, &Statement::new("SELECT 1")).await;

        // Stops at the first error instead of failing the call.
        assert!(results.next().await.is_some());
    }

    #[tokio::test]
    async fn test_drain_consumes_everything_pending() {
        let mut results = stream::iter(vec![done(), done()]);
        drain(&mut results, &Statement::new("SELECT 1")).await;
        assert!(results.next().await.is_none());
    }
}
