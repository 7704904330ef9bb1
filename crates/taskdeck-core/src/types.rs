//! Core types for the task list.
//!
//! Serializable types use `camelCase` on the wire so the JSON shape is
//! `{id, title, completed, priority, subtasks, createdAt}`.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Enums
// ─────────────────────────────────────────────────────────────────────────────

/// Task priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Default priority.
    #[default]
    Medium,
    /// Do this first.
    High,
}

impl TaskPriority {
    /// Every priority, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// SQL string representation (matches the `SQLite` CHECK constraint values).
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse a stored SQL value. Unknown values yield `None`.
    #[must_use]
    pub fn from_sql(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Error returned when a string is not a known priority.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown priority '{0}' (expected low, medium or high)")]
pub struct ParsePriorityError(pub String);

impl FromStr for TaskPriority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_sql(&s.trim().to_lowercase()).ok_or_else(|| ParsePriorityError(s.to_string()))
    }
}

/// View filter over the local task list. Never sent to the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    /// Every task.
    #[default]
    All,
    /// Tasks not yet completed.
    Pending,
    /// Completed tasks.
    Completed,
}

impl TaskFilter {
    /// Every filter, in tab order.
    pub const ALL: [Self; 3] = [Self::All, Self::Pending, Self::Completed];

    /// Whether `task` is visible under this filter.
    #[must_use]
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
        }
    }

    /// Lowercase name used on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter '{0}' (expected all, pending or completed)")]
pub struct ParseFilterError(pub String);

impl FromStr for TaskFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain types
// ─────────────────────────────────────────────────────────────────────────────

/// A task in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique ID (prefixed: `task-{uuid}`).
    pub id: String,
    /// What needs doing. Never empty.
    pub title: String,
    /// Whether the task is done.
    pub completed: bool,
    /// Priority level.
    pub priority: TaskPriority,
    /// Suggested breakdown, in the order it was supplied.
    #[serde(default)]
    pub subtasks: Vec<String>,
    /// Creation time; the list is sorted newest first on this.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Whether a subtask breakdown has already been stored.
    #[must_use]
    pub fn has_subtasks(&self) -> bool {
        !self.subtasks.is_empty()
    }
}

/// Body of a create request.
///
/// `title` is optional at the type level so a missing title surfaces as a
/// validation error rather than a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateParams {
    /// Title (required, non-blank).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Initial priority (default: Medium).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// Initial subtasks (default: empty).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<String>>,
}

impl TaskCreateParams {
    /// Params carrying just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Set the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Body of a partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateParams {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New completion state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// Replacement subtask list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<String>>,
}

impl TaskUpdateParams {
    /// Update that only sets `completed`.
    #[must_use]
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    /// Update that only replaces `subtasks`.
    #[must_use]
    pub fn subtasks(subtasks: Vec<String>) -> Self {
        Self {
            subtasks: Some(subtasks),
            ..Default::default()
        }
    }

    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
            && self.subtasks.is_none()
    }
}

/// Summary counts derived from a task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    /// All tasks.
    pub total: usize,
    /// Tasks not completed.
    pub pending: usize,
    /// Completed tasks.
    pub completed: usize,
}

impl TaskStats {
    /// Count the given tasks.
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            if task.completed {
                stats.completed += 1;
            } else {
                stats.pending += 1;
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            completed,
            priority: TaskPriority::Medium,
            subtasks: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn priority_sql_values() {
        for p in TaskPriority::ALL {
            assert_eq!(TaskPriority::from_sql(p.as_sql()), Some(p));
        }
        assert_eq!(TaskPriority::from_sql("critical"), None);
    }

    #[test]
    fn priority_from_str_is_case_insensitive() {
        assert_eq!("HIGH".parse::<TaskPriority>().unwrap(), TaskPriority::High);
        assert_eq!(" low ".parse::<TaskPriority>().unwrap(), TaskPriority::Low);
        let err = "urgent".parse::<TaskPriority>().unwrap_err();
        assert!(err.to_string().contains("urgent"));
    }

    #[test]
    fn priority_serializes_lowercase() {
        assert_eq!(serde_json::to_value(TaskPriority::High).unwrap(), "high");
        let p: TaskPriority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(p, TaskPriority::Low);
        assert!(serde_json::from_str::<TaskPriority>("\"critical\"").is_err());
    }

    #[test]
    fn task_wire_shape_is_camel_case() {
        let value = serde_json::to_value(task("task-1", false)).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["completed", "createdAt", "id", "priority", "subtasks", "title"]
        );
        assert_eq!(value["createdAt"], "2026-01-02T03:04:05Z");
    }

    #[test]
    fn task_without_subtasks_field_deserializes_empty() {
        let json = r#"{"id":"task-1","title":"x","completed":false,"priority":"high","createdAt":"2026-01-02T03:04:05Z"}"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert!(t.subtasks.is_empty());
        assert!(!t.has_subtasks());
    }

    #[test]
    fn create_params_skip_absent_fields() {
        let params = TaskCreateParams::new("Buy milk").with_priority(TaskPriority::Low);
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, serde_json::json!({"title": "Buy milk", "priority": "low"}));
    }

    #[test]
    fn update_params_ignore_unknown_fields() {
        let json = r#"{"completed":true,"id":"other","createdAt":"x","colour":"red"}"#;
        let updates: TaskUpdateParams = serde_json::from_str(json).unwrap();
        assert_eq!(updates, TaskUpdateParams::completed(true));
    }

    #[test]
    fn update_params_reject_wrong_types() {
        assert!(serde_json::from_str::<TaskUpdateParams>(r#"{"completed":"yes"}"#).is_err());
        assert!(serde_json::from_str::<TaskUpdateParams>(r#"{"subtasks":"a,b"}"#).is_err());
    }

    #[test]
    fn update_params_is_empty() {
        assert!(TaskUpdateParams::default().is_empty());
        assert!(!TaskUpdateParams::subtasks(vec![]).is_empty());
    }

    #[test]
    fn filter_matches_completion_state() {
        let open = task("a", false);
        let done = task("b", true);
        assert!(TaskFilter::All.matches(&open) && TaskFilter::All.matches(&done));
        assert!(TaskFilter::Pending.matches(&open) && !TaskFilter::Pending.matches(&done));
        assert!(!TaskFilter::Completed.matches(&open) && TaskFilter::Completed.matches(&done));
    }

    #[test]
    fn filter_parses_names() {
        for f in TaskFilter::ALL {
            assert_eq!(f.as_str().parse::<TaskFilter>().unwrap(), f);
        }
        assert_eq!("Done".parse::<TaskFilter>().unwrap(), TaskFilter::Completed);
        assert!("archived".parse::<TaskFilter>().is_err());
    }

    #[test]
    fn stats_count_each_state() {
        let tasks = vec![task("a", false), task("b", true), task("c", false)];
        let stats = TaskStats::from_tasks(&tasks);
        assert_eq!(
            stats,
            TaskStats {
                total: 3,
                pending: 2,
                completed: 1
            }
        );
        assert_eq!(TaskStats::from_tasks(&Vec::new()), TaskStats::default());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn stats_partition_total(states in proptest::collection::vec(any::<bool>(), 0..64)) {
                let tasks: Vec<Task> = states
                    .iter()
                    .enumerate()
                    .map(|(i, done)| task(&i.to_string(), *done))
                    .collect();
                let stats = TaskStats::from_tasks(&tasks);
                prop_assert_eq!(stats.total, tasks.len());
                prop_assert_eq!(stats.pending + stats.completed, stats.total);
                prop_assert_eq!(stats.completed, states.iter().filter(|d| **d).count());
            }
        }
    }
}
