//! Integration tests for the query executor and pool behaviour.

mod common;

use std::time::{Duration, Instant};

use sqlx::Row;
use uuid::Uuid;

use tenantry_infrastructure::{FetchMode, QueryExecutor, QueryOutcome, Statement};

#[tokio::test]
async fn select_without_matches_is_still_row_producing() {
    let Some(pool) = common::pool().await else { return };
    let executor = QueryExecutor::new(pool);

    let statement = Statement::new("SELECT id FROM users WHERE id = $1").bind(Uuid::new_v4());
    let outcome = executor.execute(&statement, FetchMode::One).await.unwrap();

    assert!(matches!(outcome, QueryOutcome::Rows(rows) if rows.is_empty()));
}

#[tokio::test]
async fn write_without_matches_completes_and_commits() {
    let Some(pool) = common::pool().await else { return };
    let executor = QueryExecutor::new(pool);

    let statement = Statement::new("DELETE FROM users WHERE id = $1").bind(Uuid::new_v4());
    let outcome = executor.execute(&statement, FetchMode::None).await.unwrap();

    assert!(matches!(outcome, QueryOutcome::Completed { rows_affected: 0 }));
}

#[tokio::test]
async fn fetch_modes_limit_returned_rows() {
    let Some(pool) = common::pool().await else { return };
    let executor = QueryExecutor::new(pool);
    let statement = Statement::new("SELECT generate_series(1, 5) AS n");

    let none = executor.execute(&statement, FetchMode::None).await.unwrap();
    let one = executor.execute(&statement, FetchMode::One).await.unwrap();
    let all = executor.execute(&statement, FetchMode::All).await.unwrap();

    assert!(matches!(none, QueryOutcome::Rows(rows) if rows.is_empty()));
    match one {
        QueryOutcome::Rows(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].get::<i32, _>("n"), 1);
        }
        other => panic!("expected rows, got {:?}", other),
    }
    assert!(matches!(all, QueryOutcome::Rows(rows) if rows.len() == 5));
}

#[tokio::test]
async fn committed_writes_are_visible_to_other_connections() {
    let Some(pool) = common::pool().await else { return };
    let executor = QueryExecutor::new(pool.clone());
    let id = Uuid::new_v4();

    let insert = Statement::new("INSERT INTO tenants (id, full_name) VALUES ($1, $2)")
        .bind(id)
        .bind("Visible Tenant");
    assert_eq!(executor.run_command(&insert).await.unwrap(), 1);

    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM tenants WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let delete = Statement::new("DELETE FROM tenants WHERE id = $1").bind(id);
    assert_eq!(executor.run_command(&delete).await.unwrap(), 1);
}

#[tokio::test]
async fn execution_errors_carry_statement_context() {
    let Some(pool) = common::pool().await else { return };
    let executor = QueryExecutor::new(pool);

    let statement = Statement::new("SELECT * FROM no_such_table WHERE id = $1").bind(Uuid::nil());
    let err = executor.execute(&statement, FetchMode::All).await.unwrap_err();

    assert_eq!(err.statement(), statement.sql());
    assert_eq!(err.params(), [Uuid::nil().to_string()]);
    assert!(!err.is_pool_timeout());
}

#[tokio::test]
async fn connection_is_reusable_after_a_failed_statement() {
    let Some(pool) = common::pool_with(1, 3).await else { return };
    let executor = QueryExecutor::new(pool);

    let broken = Statement::new("SELECT 1/0 AS boom");
    assert!(executor.execute(&broken, FetchMode::One).await.is_err());

    let ok = Statement::new("SELECT 1 AS n");
    assert!(executor.execute(&ok, FetchMode::One).await.is_ok());
}

#[tokio::test]
async fn released_connections_have_session_state_reset() {
    let Some(pool) = common::pool_with(1, 3).await else { return };

    {
        let mut conn = pool.acquire().await.unwrap();
        sqlx::query("SET application_name = 'leaky'")
            .execute(&mut *conn)
            .await
            .unwrap();
    }

    // Single-connection pool: this is the same physical connection.
    let name: String = sqlx::query_scalar("SHOW application_name")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_ne!(name, "leaky");
}

#[tokio::test]
async fn exhausted_pool_makes_next_caller_wait() {
    let Some(pool) = common::pool_with(2, 5).await else { return };
    let executor = QueryExecutor::new(pool.clone());

    let first = pool.acquire().await.unwrap();
    let second = pool.acquire().await.unwrap();

    let started = Instant::now();
    let waiter = tokio::spawn({
        let executor = executor.clone();
        async move {
            let statement = Statement::new("DELETE FROM users WHERE id = $1").bind(Uuid::new_v4());
            executor.run_command(&statement).await
        }
    });

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(!waiter.is_finished());
    drop(first);

    let result = waiter.await.unwrap();
    assert!(result.is_ok());
    assert!(started.elapsed() >= Duration::from_millis(300));
    drop(second);
}

#[tokio::test]
async fn exhausted_pool_times_out_when_nothing_is_released() {
    let Some(pool) = common::pool_with(1, 1).await else { return };
    let executor = QueryExecutor::new(pool.clone());

    let _held = pool.acquire().await.unwrap();
    let err = executor
        .run_command(&Statement::new("SELECT 1"))
        .await
        .unwrap_err();

    assert!(err.is_pool_timeout());
}

#[tokio::test]
async fn dead_pooled_connection_is_replaced() {
    let Some(pool) = common::pool_with(1, 3).await else { return };
    let Some(admin) = common::pool().await else { return };
    let executor = QueryExecutor::new(pool.clone());

    let pid: i32 = sqlx::query_scalar("SELECT pg_backend_pid()")
        .fetch_one(&pool)
        .await
        .unwrap();
    let terminated: bool = sqlx::query_scalar("SELECT pg_terminate_backend($1)")
        .bind(pid)
        .fetch_one(&admin)
        .await
        .unwrap();
    assert!(terminated);
    tokio::time::sleep(Duration::from_millis(200)).await;

    let statement = Statement::new("SELECT pg_backend_pid() AS pid");
    match executor.execute(&statement, FetchMode::One).await.unwrap() {
        QueryOutcome::Rows(rows) => assert_ne!(rows[0].get::<i32, _>("pid"), pid),
        other => panic!("expected rows, got {:?}", other),
    }
}

#[tokio::test]
async fn row_producing_write_is_not_committed() {
    let Some(pool) = common::pool().await else { return };
    let executor = QueryExecutor::new(pool.clone());
    let id = Uuid::new_v4();

    let insert = Statement::new("INSERT INTO tenants (id, full_name) VALUES ($1, $2) RETURNING id")
        .bind(id)
        .bind("Returning Tenant");
    match executor.execute(&insert, FetchMode::One).await.unwrap() {
        QueryOutcome::Rows(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].get::<Uuid, _>("id"), id);
        }
        other => panic!("expected rows, got {:?}", other),
    }

    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM tenants WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
