//! Business logic layer for task management.
//!
//! Wraps the repository with validation and defaults:
//!
//! - **Titles**: required on create, and never blank (create or update).
//! - **Defaults**: priority `medium`, `completed = false`, no subtasks.
//! - **Idempotent delete**: removing an unknown ID is not an error.

use rusqlite::Connection;
use tracing::{debug, info};

use taskdeck_core::{Task, TaskCreateParams, TaskUpdateParams};

use crate::errors::{Result, StoreError};
use crate::repository::{NewTask, TaskRepository};

fn require_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(StoreError::Validation("title must not be empty".to_string()));
    }
    Ok(())
}

/// Task service with validation.
pub struct TaskService;

impl TaskService {
    /// All tasks, newest first.
    pub fn list_tasks(conn: &Connection) -> Result<Vec<Task>> {
        let tasks = TaskRepository::list_tasks(conn)?;
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Validate and persist a new task.
    pub fn create_task(conn: &Connection, params: &TaskCreateParams) -> Result<Task> {
        let title = params
            .title
            .as_deref()
            .ok_or_else(|| StoreError::Validation("title is required".to_string()))?;
        require_title(title)?;

        let new = NewTask {
            title: title.to_string(),
            priority: params.priority.unwrap_or_default(),
            subtasks: params.subtasks.clone().unwrap_or_default(),
        };
        let task = TaskRepository::insert_task(conn, &new)?;

        info!(
            task_id = %task.id,
            priority = %task.priority,
            subtasks = task.subtasks.len(),
            "task created"
        );
        Ok(task)
    }

    /// Apply a partial update. `Ok(None)` means no task has this ID.
    pub fn update_task(
        conn: &Connection,
        id: &str,
        updates: &TaskUpdateParams,
    ) -> Result<Option<Task>> {
        if let Some(ref title) = updates.title {
            require_title(title)?;
        }

        let updated = TaskRepository::update_task(conn, id, updates)?;
        match updated {
            Some(ref task) => info!(
                task_id = %task.id,
                completed = task.completed,
                subtasks = task.subtasks.len(),
                "task updated"
            ),
            None => debug!(task_id = id, "update matched no task"),
        }
        Ok(updated)
    }

    /// Delete a task. Unknown IDs succeed silently.
    pub fn delete_task(conn: &Connection, id: &str) -> Result<()> {
        let removed = TaskRepository::delete_task(conn, id)?;
        if removed {
            info!(task_id = id, "task deleted");
        } else {
            debug!(task_id = id, "delete matched no task");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;
    use taskdeck_core::TaskPriority;

    fn setup_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        let _ = run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn create_applies_defaults() {
        let conn = setup_db();
        let task = TaskService::create_task(&conn, &TaskCreateParams::new("Buy milk")).unwrap();
        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.subtasks.is_empty());
    }

    #[test]
    fn create_keeps_given_priority_and_subtasks() {
        let conn = setup_db();
        let params = TaskCreateParams {
            title: Some("Plan party".into()),
            priority: Some(TaskPriority::High),
            subtasks: Some(vec!["Invite".into(), "Cake".into()]),
        };
        let task = TaskService::create_task(&conn, &params).unwrap();
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.subtasks, vec!["Invite", "Cake"]);
    }

    #[test]
    fn create_without_title_is_validation_error() {
        let conn = setup_db();
        let err = TaskService::create_task(&conn, &TaskCreateParams::default()).unwrap_err();
        assert!(err.is_validation());
        assert!(TaskService::list_tasks(&conn).unwrap().is_empty());
    }

    #[test]
    fn create_with_blank_title_is_validation_error() {
        let conn = setup_db();
        let err = TaskService::create_task(&conn, &TaskCreateParams::new("   ")).unwrap_err();
        assert!(err.is_validation());
        assert!(TaskService::list_tasks(&conn).unwrap().is_empty());
    }

    #[test]
    fn list_is_newest_first() {
        let conn = setup_db();
        let a = TaskService::create_task(&conn, &TaskCreateParams::new("A")).unwrap();
        let b = TaskService::create_task(&conn, &TaskCreateParams::new("B")).unwrap();
        let tasks = TaskService::list_tasks(&conn).unwrap();
        assert_eq!(tasks[0].id, b.id);
        assert_eq!(tasks[1].id, a.id);
    }

    #[test]
    fn update_rejects_blank_title() {
        let conn = setup_db();
        let task = TaskService::create_task(&conn, &TaskCreateParams::new("Keep")).unwrap();
        let updates = TaskUpdateParams {
            title: Some(String::new()),
            ..Default::default()
        };
        let err = TaskService::update_task(&conn, &task.id, &updates).unwrap_err();
        assert!(err.is_validation());
        let tasks = TaskService::list_tasks(&conn).unwrap();
        assert_eq!(tasks[0].title, "Keep");
    }

    #[test]
    fn update_unknown_id_is_none() {
        let conn = setup_db();
        let result =
            TaskService::update_task(&conn, "task-nope", &TaskUpdateParams::completed(true))
                .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn toggle_twice_restores_state() {
        let conn = setup_db();
        let task = TaskService::create_task(&conn, &TaskCreateParams::new("Flip")).unwrap();
        let once = TaskService::update_task(&conn, &task.id, &TaskUpdateParams::completed(true))
            .unwrap()
            .unwrap();
        let twice = TaskService::update_task(&conn, &task.id, &TaskUpdateParams::completed(false))
            .unwrap()
            .unwrap();
        assert!(once.completed);
        assert_eq!(twice, task);
    }

    #[test]
    fn delete_is_idempotent() {
        let conn = setup_db();
        let task = TaskService::create_task(&conn, &TaskCreateParams::new("Bye")).unwrap();
        TaskService::delete_task(&conn, &task.id).unwrap();
        TaskService::delete_task(&conn, &task.id).unwrap();
        TaskService::delete_task(&conn, "task-never-existed").unwrap();
        assert!(TaskService::list_tasks(&conn).unwrap().is_empty());
    }
}
