use thiserror::Error;

/// Failures surfaced by store operations.
///
/// Lookups report an absent row as `Ok(None)`, so a caller can always tell
/// "no matching rows" apart from "the store failed".
#[derive(Debug, Error)]
pub enum DbError {
    /// The database could not be reached (pool, IO or TLS level).
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// A unique, foreign-key or check constraint rejected the statement.
    #[error("constraint violation: {0}")]
    Constraint(#[source] sqlx::Error),

    /// A row that was required to exist was absent.
    #[error("row not found")]
    NotFound,

    /// Any other execution failure (malformed statement, decode error, ...).
    #[error("query execution failed: {0}")]
    Query(#[source] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => DbError::Connection(err),
            sqlx::Error::Database(db)
                if db.is_unique_violation()
                    || db.is_foreign_key_violation()
                    || db.is_check_violation() =>
            {
                DbError::Constraint(err)
            }
            _ => DbError::Query(err),
        }
    }
}
