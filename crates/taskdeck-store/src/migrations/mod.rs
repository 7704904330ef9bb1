//! Schema migration runner for the task database.
//!
//! Migrations are embedded at compile time via [`include_str!`] and executed
//! in version order. Each migration runs inside a transaction, so a failure
//! rolls back with no partial schema state.
//!
//! The `schema_version` table tracks which migrations have been applied.
//! Running the migrator is idempotent: already-applied versions are skipped.

use rusqlite::Connection;
use tracing::{debug, info};

use crate::errors::{Result, StoreError};

struct Migration {
    version: u32,
    description: &'static str,
    sql: &'static str,
}

/// All migrations in version order.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "Task documents table and creation-order index",
    sql: include_str!("v001_tasks.sql"),
}];

/// Run all pending migrations on the given connection.
///
/// Returns the number of migrations applied.
pub fn run_migrations(conn: &Connection) -> Result<u32> {
    ensure_version_table(conn)?;
    let current = current_version(conn)?;
    let mut applied = 0;

    for migration in MIGRATIONS {
        if migration.version <= current {
            debug!(
                version = migration.version,
                description = migration.description,
                "migration already applied, skipping"
            );
            continue;
        }

        info!(
            version = migration.version,
            description = migration.description,
            "applying migration"
        );

        apply_migration(conn, migration)?;
        applied += 1;
    }

    if applied > 0 {
        info!(applied, "migrations complete");
    }

    Ok(applied)
}

/// Return the highest applied migration version, or 0 if none.
pub fn current_version(conn: &Connection) -> Result<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| StoreError::Migration {
        message: format!("failed to read schema_version: {e}"),
    })
}

/// Return the latest migration version defined in code.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

fn ensure_version_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
           version     INTEGER PRIMARY KEY,
           applied_at  TEXT    NOT NULL,
           description TEXT
         );",
    )
    .map_err(|e| StoreError::Migration {
        message: format!("failed to create schema_version table: {e}"),
    })
}

fn apply_migration(conn: &Connection, migration: &Migration) -> Result<()> {
    let fail = |stage: &str, e: rusqlite::Error| StoreError::Migration {
        message: format!(
            "v{} ({}) {stage}: {e}",
            migration.version, migration.description
        ),
    };

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| fail("could not begin", e))?;

    tx.execute_batch(migration.sql)
        .map_err(|e| fail("failed", e))?;

    let _ = tx
        .execute(
            "INSERT INTO schema_version (version, applied_at, description) \
             VALUES (?1, datetime('now'), ?2)",
            rusqlite::params![migration.version, migration.description],
        )
        .map_err(|e| fail("could not be recorded", e))?;

    tx.commit().map_err(|e| fail("could not commit", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_memory() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn run_migrations_creates_tasks_table() {
        let conn = open_memory();
        let applied = run_migrations(&conn).unwrap();
        assert_eq!(applied, latest_version());

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(std::result::Result::ok)
            .collect();
        assert!(tables.contains(&"tasks".to_string()));
        assert!(tables.contains(&"schema_version".to_string()));
    }

    #[test]
    fn run_migrations_is_idempotent() {
        let conn = open_memory();
        assert_eq!(run_migrations(&conn).unwrap(), 1);
        assert_eq!(run_migrations(&conn).unwrap(), 0);
        assert_eq!(current_version(&conn).unwrap(), latest_version());
    }

    #[test]
    fn schema_rejects_unknown_priority() {
        let conn = open_memory();
        let _ = run_migrations(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO tasks (id, title, priority, created_at) VALUES ('t', 'x', 'urgent', 0)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn schema_rejects_blank_title() {
        let conn = open_memory();
        let _ = run_migrations(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO tasks (id, title, created_at) VALUES ('t', '   ', 0)",
            [],
        );
        assert!(result.is_err());
    }
}
