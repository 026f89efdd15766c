//! SQLite connection pool wrapper for the storage crate.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Owns the process-wide SQLite pool. Cloning shares the pool; each query checks a
/// connection out and returns it when the query future completes or is dropped.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Opens a pool for the given database URL (`sqlite://path` or `sqlite::memory:`).
    ///
    /// The database is owned by another service, so a missing file is an error rather than
    /// being created empty.
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        info!(
            database_url = %database_url,
            max_connections = max_connections,
            "Initializing SQLite pool"
        );

        let options = SqliteConnectOptions::from_str(database_url)?;
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes every connection; pending checkouts fail afterwards.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
