pub mod postgres;
pub mod schema;
pub mod store;

use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::error::DbResult;

pub use postgres::PostgresStore;
pub use store::Store;

/// Shared, dependency-injected handle to the data-access backend.
pub type Database = Arc<dyn Store>;

/// Result limit applied when a caller does not supply one.
pub const DEFAULT_RESULT_LIMIT: i64 = 10;

/// Build the connection pool, verify it answers, and hand back the store.
pub async fn init_database(config: &DatabaseConfig) -> DbResult<Database> {
    tracing::info!("Initializing PostgreSQL store");
    let pool = postgres::connection::create_pool(config).await?;
    postgres::connection::test_connection(&pool).await?;
    Ok(Arc::new(PostgresStore::new(pool)) as Database)
}
