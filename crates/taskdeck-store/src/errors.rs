//! Error types for the task store.
//!
//! Validation failures are kept apart from storage failures so the HTTP
//! layer can report the former as client errors.

use thiserror::Error;

/// Errors from task store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `SQLite` database error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// JSON serialization/deserialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Schema migration failed.
    #[error("migration error: {message}")]
    Migration {
        /// Describes which migration failed and why.
        message: String,
    },

    /// Input rejected before reaching the database.
    #[error("{0}")]
    Validation(String),

    /// A stored row could not be decoded into a task.
    #[error("corrupt task row {id}: {message}")]
    CorruptRow {
        /// Task ID of the offending row.
        id: String,
        /// What was wrong with it.
        message: String,
    },
}

impl StoreError {
    /// Whether the caller sent bad input (as opposed to a storage failure).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Convenience type alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_error_display() {
        let err = StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows);
        assert!(err.to_string().contains("sqlite error"));
        assert!(!err.is_validation());
    }

    #[test]
    fn validation_display_is_bare_message() {
        let err = StoreError::Validation("title is required".to_string());
        assert_eq!(err.to_string(), "title is required");
        assert!(err.is_validation());
    }

    #[test]
    fn corrupt_row_display() {
        let err = StoreError::CorruptRow {
            id: "task-1".into(),
            message: "unknown priority 'urgent'".into(),
        };
        assert_eq!(
            err.to_string(),
            "corrupt task row task-1: unknown priority 'urgent'"
        );
    }

    #[test]
    fn migration_error_display() {
        let err = StoreError::Migration {
            message: "v1 failed".into(),
        };
        assert_eq!(err.to_string(), "migration error: v1 failed");
    }
}
