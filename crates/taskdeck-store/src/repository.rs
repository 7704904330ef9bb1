//! SQL data access layer for tasks.
//!
//! All methods take a `&Connection` parameter and are stateless, translating
//! between Rust types and SQL. IDs are `task-` prefixed UUID v7 values.
//! Creation timestamps are epoch milliseconds and strictly increase across
//! inserts, so `created_at DESC` is a total order.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior, params};
use uuid::Uuid;

use taskdeck_core::{Task, TaskPriority, TaskUpdateParams};

use crate::errors::{Result, StoreError};

const TASK_COLUMNS: &str = "id, title, completed, priority, subtasks, created_at";

/// Generate a prefixed UUID v7 ID.
fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7())
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Pick a creation timestamp strictly after the newest stored one.
fn next_created_at(now: i64, newest: Option<i64>) -> i64 {
    match newest {
        Some(newest) if newest >= now => newest + 1,
        _ => now,
    }
}

fn subtasks_to_json(subtasks: &[String]) -> Result<String> {
    Ok(serde_json::to_string(subtasks)?)
}

/// A validated task ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Non-blank title.
    pub title: String,
    /// Priority.
    pub priority: TaskPriority,
    /// Initial subtasks.
    pub subtasks: Vec<String>,
}

/// Raw column values of a `tasks` row.
struct TaskRow {
    id: String,
    title: String,
    completed: bool,
    priority: String,
    subtasks: String,
    created_at: i64,
}

impl TaskRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            completed: row.get("completed")?,
            priority: row.get("priority")?,
            subtasks: row.get("subtasks")?,
            created_at: row.get("created_at")?,
        })
    }

    fn into_task(self) -> Result<Task> {
        let corrupt = |message: String| StoreError::CorruptRow {
            id: self.id.clone(),
            message,
        };

        let priority = TaskPriority::from_sql(&self.priority)
            .ok_or_else(|| corrupt(format!("unknown priority '{}'", self.priority)))?;
        let subtasks: Vec<String> = serde_json::from_str(&self.subtasks)
            .map_err(|e| corrupt(format!("bad subtasks JSON: {e}")))?;
        let created_at = DateTime::<Utc>::from_timestamp_millis(self.created_at)
            .ok_or_else(|| corrupt(format!("timestamp out of range: {}", self.created_at)))?;

        Ok(Task {
            id: self.id,
            title: self.title,
            completed: self.completed,
            priority,
            subtasks,
            created_at,
        })
    }
}

/// Task repository for SQL CRUD operations.
pub struct TaskRepository;

impl TaskRepository {
    /// Insert a new task and return it.
    pub fn insert_task(conn: &Connection, new: &NewTask) -> Result<Task> {
        let id = generate_id("task");
        let subtasks_json = subtasks_to_json(&new.subtasks)?;

        // Immediate so the MAX read and the insert see the same newest row
        let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
        let newest: Option<i64> =
            tx.query_row("SELECT MAX(created_at) FROM tasks", [], |row| row.get(0))?;
        let created_at = next_created_at(now_ms(), newest);

        let _ = tx.execute(
            "INSERT INTO tasks (id, title, completed, priority, subtasks, created_at)
             VALUES (?1, ?2, 0, ?3, ?4, ?5)",
            params![id, new.title, new.priority.as_sql(), subtasks_json, created_at],
        )?;
        tx.commit()?;

        TaskRow {
            id,
            title: new.title.clone(),
            completed: false,
            priority: new.priority.as_sql().to_string(),
            subtasks: subtasks_json,
            created_at,
        }
        .into_task()
    }

    /// Get a task by ID.
    pub fn get_task(conn: &Connection, id: &str) -> Result<Option<Task>> {
        let row = conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id],
                TaskRow::from_row,
            )
            .optional()?;
        row.map(TaskRow::into_task).transpose()
    }

    /// List every task, newest first.
    pub fn list_tasks(conn: &Connection) -> Result<Vec<Task>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC, seq DESC"
        ))?;
        let rows = stmt
            .query_map([], TaskRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(TaskRow::into_task).collect()
    }

    /// Apply a partial update. Returns the updated task, or `None` if no
    /// task has this ID.
    pub fn update_task(
        conn: &Connection,
        id: &str,
        updates: &TaskUpdateParams,
    ) -> Result<Option<Task>> {
        if updates.is_empty() {
            return Self::get_task(conn, id);
        }

        // Build dynamic SET clause
        let mut sets: Vec<&'static str> = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(ref title) = updates.title {
            sets.push("title = ?");
            values.push(Box::new(title.clone()));
        }
        if let Some(completed) = updates.completed {
            sets.push("completed = ?");
            values.push(Box::new(completed));
        }
        if let Some(priority) = updates.priority {
            sets.push("priority = ?");
            values.push(Box::new(priority.as_sql()));
        }
        if let Some(ref subtasks) = updates.subtasks {
            sets.push("subtasks = ?");
            values.push(Box::new(subtasks_to_json(subtasks)?));
        }

        values.push(Box::new(id.to_string()));
        let sql = format!("UPDATE tasks SET {} WHERE id = ?", sets.join(", "));

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            values.iter().map(AsRef::as_ref).collect();
        let changed = conn.execute(&sql, params_refs.as_slice())?;

        if changed == 0 {
            return Ok(None);
        }

        Self::get_task(conn, id)
    }

    /// Delete a task by ID. Returns true if a row was deleted.
    pub fn delete_task(conn: &Connection, id: &str) -> Result<bool> {
        let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}
