//! Database connection pool

use sqlx::{postgres::PgPoolOptions, Executor, PgConnection, PgPool};
use tracing::{info, warn};

use tenantry_shared::config::DatabaseSettings;

/// Connects eagerly: an unreachable store fails here, at startup, rather
/// than on the first request.
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let pool = pool_options(settings).connect(&settings.url).await?;

    // Test connection
    sqlx::query("SELECT 1").execute(&pool).await?;

    info!(
        max_connections = settings.max_connections,
        acquire_timeout_secs = settings.acquire_timeout_secs,
        "Database pool ready"
    );
    Ok(pool)
}

/// Fixed-size pool. Connections are pinged before hand-out (dead ones are
/// replaced) and have their session state reset when they come back.
pub fn pool_options(settings: &DatabaseSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout())
        .idle_timeout(settings.idle_timeout())
        .test_before_acquire(true)
        .after_release(|conn, _meta| Box::pin(reset_session(conn)))
}

/// Returning `false` tells the pool to close the connection instead of
/// reusing it.
async fn reset_session(conn: &mut PgConnection) -> Result<bool, sqlx::Error> {
    match conn.execute(sqlx::raw_sql("CLOSE ALL; RESET ALL")).await {
        Ok(_) => Ok(true),
        Err(e) => {
            warn!("Session reset failed, discarding connection: {}", e);
            Ok(false)
        }
    }
}
