//! `SQLite` connection pool with WAL mode and foreign keys enabled.
//!
//! Uses `r2d2` connection pooling with the `r2d2_sqlite` backend.
//! [`PragmaCustomizer`] runs on each new connection.

use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::errors::Result;
use crate::migrations::run_migrations;

/// Alias for the connection pool type.
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Configuration for the connection pool.
#[derive(Clone, Debug)]
pub struct ConnectionConfig {
    /// Maximum pool size (default: 8).
    pub pool_size: u32,
    /// Busy timeout in milliseconds (default: 5000).
    pub busy_timeout_ms: u32,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            pool_size: 8,
            busy_timeout_ms: 5_000,
        }
    }
}

#[derive(Debug)]
struct PragmaCustomizer {
    busy_timeout_ms: u32,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for PragmaCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.execute_batch(&format!(
            "PRAGMA journal_mode = WAL;\
             PRAGMA busy_timeout = {};\
             PRAGMA foreign_keys = ON;\
             PRAGMA synchronous = NORMAL;",
            self.busy_timeout_ms
        ))
    }
}

fn build(
    manager: SqliteConnectionManager,
    pool_size: u32,
    busy_timeout_ms: u32,
) -> Result<ConnectionPool> {
    let pool = Pool::builder()
        .max_size(pool_size)
        .connection_timeout(Duration::from_secs(5))
        .connection_customizer(Box::new(PragmaCustomizer { busy_timeout_ms }))
        .build(manager)?;
    Ok(pool)
}

/// Create a file-backed connection pool.
pub fn new_file(path: &str, config: &ConnectionConfig) -> Result<ConnectionPool> {
    build(
        SqliteConnectionManager::file(path),
        config.pool_size,
        config.busy_timeout_ms,
    )
}

/// Create an in-memory connection pool (for testing).
///
/// Every in-memory connection is its own database, so the pool is capped at
/// one connection regardless of `config.pool_size`.
pub fn new_in_memory(config: &ConnectionConfig) -> Result<ConnectionPool> {
    build(SqliteConnectionManager::memory(), 1, config.busy_timeout_ms)
}

/// Open a file-backed pool and bring its schema up to date.
pub fn open(path: &str, config: &ConnectionConfig) -> Result<ConnectionPool> {
    let pool = new_file(path, config)?;
    {
        let conn = pool.get()?;
        let _ = run_migrations(&conn)?;
    }
    Ok(pool)
}

/// Open a migrated in-memory pool (for testing).
pub fn open_in_memory() -> Result<ConnectionPool> {
    let pool = new_in_memory(&ConnectionConfig::default())?;
    {
        let conn = pool.get()?;
        let _ = run_migrations(&conn)?;
    }
    Ok(pool)
}
