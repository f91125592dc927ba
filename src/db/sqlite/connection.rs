//! SQLite connection and schema management.

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info};

use super::todo::SqliteTodoRepository;
use crate::db::{Database, DbError, DbResult};

const SCHEMA: &str = include_str!("../../../data/sql/sqlite/todo.sql");

/// SQLite database implementation.
///
/// Holds a pool capped at one connection: every request shares the same
/// handle and SQLite serializes the statements.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (or create) a database file at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening sqlite database");
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect(options).await
    }

    /// Create an in-memory database (useful for testing).
    pub async fn in_memory() -> DbResult<Self> {
        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;
        Self::connect(options).await
    }

    async fn connect(options: SqliteConnectOptions) -> DbResult<Self> {
        // An in-memory database lives exactly as long as its connection,
        // so the single connection must never be recycled.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;
        Ok(Self { pool })
    }

    /// Direct access to the pool, for tests and ad-hoc queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Todos<'a> = SqliteTodoRepository<'a>;

    async fn init_schema(&self) -> DbResult<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        info!("todo table ready");
        Ok(())
    }

    fn todos(&self) -> Self::Todos<'_> {
        SqliteTodoRepository { pool: &self.pool }
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
