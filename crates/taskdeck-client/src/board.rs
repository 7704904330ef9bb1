//! Board: the client-side state container.
//!
//! A [`Board`] owns the local task cache, backend connectivity, the current
//! error banner, the view filter, the new-task form and the set of expanded
//! tasks. Every operation takes `&mut self`, so calls on one board are
//! strictly sequenced and a late response can never overwrite a newer one.
//!
//! Failures never propagate out of the board. They are turned into a
//! user-facing message in [`Board::error_message`].

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use taskdeck_ai::SubtaskProvider;
use taskdeck_core::{Task, TaskCreateParams, TaskFilter, TaskPriority, TaskStats, TaskUpdateParams};

use crate::api::TaskApi;

/// Shown when a create fails.
pub const ADD_FAILED: &str = "Failed to add task. Is the server running?";
/// Shown when a toggle fails.
pub const UPDATE_FAILED: &str = "Failed to update task.";
/// Shown when a delete fails.
pub const DELETE_FAILED: &str = "Failed to delete task.";
/// Shown when storing AI subtasks fails.
pub const SAVE_SUBTASKS_FAILED: &str = "Failed to save AI subtasks.";

/// Banner shown when the initial load cannot reach the backend.
#[must_use]
pub fn unreachable_message(address: &str) -> String {
    format!("The backend server ({address}) is unreachable. Please ensure it is running.")
}

/// Backend reachability as last observed by [`Board::load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Connectivity {
    /// No load has completed yet.
    #[default]
    Unknown,
    /// The last load succeeded.
    Online,
    /// The last load failed.
    Offline,
}

impl Connectivity {
    /// Badge text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Checking...",
            Self::Online => "Online",
            Self::Offline => "Offline",
        }
    }
}

/// New-task form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    /// Title as typed.
    pub title: String,
    /// Selected priority.
    pub priority: TaskPriority,
}

impl TaskForm {
    /// Whether the form holds a submittable title.
    #[must_use]
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Client-side task board.
pub struct Board {
    api: Arc<dyn TaskApi>,
    ai: Arc<dyn SubtaskProvider>,
    tasks: Vec<Task>,
    is_loading: bool,
    connectivity: Connectivity,
    error_message: Option<String>,
    filter: TaskFilter,
    form: TaskForm,
    expanded: HashSet<String>,
}

impl Board {
    /// Empty board in the `Unknown` connectivity state.
    ///
    /// Starts with `is_loading` set; call [`Board::load`] to fetch tasks.
    pub fn new(api: Arc<dyn TaskApi>, ai: Arc<dyn SubtaskProvider>) -> Self {
        Self {
            api,
            ai,
            tasks: Vec::new(),
            is_loading: true,
            connectivity: Connectivity::Unknown,
            error_message: None,
            filter: TaskFilter::All,
            form: TaskForm::default(),
            expanded: HashSet::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Local task cache, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Whether a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Last observed backend connectivity.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Current error banner, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Active view filter.
    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    /// New-task form.
    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    /// Whether a task's subtasks are shown.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Backend address used in messages.
    pub fn address(&self) -> String {
        self.api.address()
    }

    /// Look up a cached task.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks visible under the current filter, in list order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| self.filter.matches(t)).collect()
    }

    /// Counts over the whole cache, ignoring the filter.
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    /// Resolve a 1-based row number in the visible list, or a full task ID.
    pub fn resolve(&self, selector: &str) -> Option<String> {
        let selector = selector.trim();
        if let Ok(row) = selector.parse::<usize>() {
            return row
                .checked_sub(1)
                .and_then(|i| self.visible_tasks().get(i).map(|t| t.id.clone()));
        }
        self.task(selector).map(|t| t.id.clone())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Local edits
    // ─────────────────────────────────────────────────────────────────────

    /// Switch the view filter.
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    /// Replace the form title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    /// Replace the form priority.
    pub fn set_priority(&mut self, priority: TaskPriority) {
        self.form.priority = priority;
    }

    /// Clear the error banner.
    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    /// Whether the add action is currently possible.
    pub fn can_add(&self) -> bool {
        self.form.has_title() && self.connectivity != Connectivity::Offline
    }

    // ─────────────────────────────────────────────────────────────────────
    // Remote operations
    // ─────────────────────────────────────────────────────────────────────

    /// Fetch all tasks and record connectivity.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        self.is_loading = true;
        self.error_message = None;

        match self.api.list_tasks().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "tasks loaded");
                self.tasks = tasks;
                self.connectivity = Connectivity::Online;
            }
            Err(e) => {
                info!(error = %e, "backend unreachable");
                self.connectivity = Connectivity::Offline;
                self.error_message = Some(unreachable_message(&self.api.address()));
            }
        }

        self.is_loading = false;
    }

    /// Submit the form. No-op when the title is blank or the backend is
    /// offline.
    #[instrument(skip(self))]
    pub async fn add_task(&mut self) {
        if !self.can_add() {
            debug!("add ignored");
            return;
        }

        let params =
            TaskCreateParams::new(self.form.title.clone()).with_priority(self.form.priority);
        match self.api.create_task(&params).await {
            Ok(task) => {
                self.tasks.insert(0, task);
                self.form = TaskForm::default();
            }
            Err(_) => self.error_message = Some(ADD_FAILED.to_string()),
        }
    }

    /// Flip a task's completion state.
    #[instrument(skip(self))]
    pub async fn toggle_completed(&mut self, id: &str) {
        let Some(current) = self.task(id).map(|t| t.completed) else {
            debug!(task_id = id, "toggle on unknown task");
            return;
        };

        match self
            .api
            .update_task(id, &TaskUpdateParams::completed(!current))
            .await
        {
            Ok(updated) => self.merge(id, updated),
            Err(_) => self.error_message = Some(UPDATE_FAILED.to_string()),
        }
    }

    /// Delete a task.
    #[instrument(skip(self))]
    pub async fn delete_task(&mut self, id: &str) {
        match self.api.delete_task(id).await {
            Ok(()) => {
                self.tasks.retain(|t| t.id != id);
                let _ = self.expanded.remove(id);
            }
            Err(_) => self.error_message = Some(DELETE_FAILED.to_string()),
        }
    }

    /// Show or generate a task's subtask breakdown.
    ///
    /// A task that already has subtasks only has its expanded flag flipped.
    /// Otherwise suggestions are fetched, stored on the server, merged into
    /// the cache and expanded.
    #[instrument(skip(self))]
    pub async fn breakdown(&mut self, id: &str) {
        let Some(task) = self.task(id) else {
            debug!(task_id = id, "breakdown on unknown task");
            return;
        };

        if task.has_subtasks() {
            if !self.expanded.remove(id) {
                let _ = self.expanded.insert(id.to_string());
            }
            return;
        }

        let title = task.title.clone();
        let suggestions = self.ai.suggest_subtasks(&title).await;
        match self
            .api
            .update_task(id, &TaskUpdateParams::subtasks(suggestions))
            .await
        {
            Ok(updated) => {
                let stored = updated.is_some();
                self.merge(id, updated);
                if stored {
                    let _ = self.expanded.insert(id.to_string());
                }
            }
            Err(_) => self.error_message = Some(SAVE_SUBTASKS_FAILED.to_string()),
        }
    }

    /// Replace the cached copy of `id` with the server's, or drop it when
    /// the server no longer has it.
    fn merge(&mut self, id: &str, updated: Option<Task>) {
        match updated {
            Some(task) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) {
                    *slot = task;
                }
            }
            None => {
                debug!(task_id = id, "server has no such task, dropping");
                self.tasks.retain(|t| t.id != id);
                let _ = self.expanded.remove(id);
            }
        }
    }
}
