use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::error::{DbError, DbResult};

pub async fn create_pool(config: &DatabaseConfig) -> DbResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_millis(config.acquire_timeout_ms))
        .connect(&config.url)
        .await
        .map_err(DbError::Connection)
}

pub async fn test_connection(pool: &PgPool) -> DbResult<()> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(DbError::Connection)?;
    Ok(())
}
