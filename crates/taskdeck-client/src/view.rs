//! Plain-text rendering of a [`Board`].

use std::fmt::Write as _;

use taskdeck_core::{Task, TaskFilter};

use crate::board::{Board, Connectivity};

/// Render the whole screen.
#[must_use]
pub fn render(board: &Board) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "taskdeck  [{}]", board.connectivity().label());
    if let Some(message) = board.error_message() {
        let _ = writeln!(out, "! {message}");
    }

    let stats = board.stats();
    let _ = writeln!(
        out,
        "Total {}  Pending {}  Done {}",
        stats.total, stats.pending, stats.completed
    );
    let _ = writeln!(out, "{}", filter_tabs(board.filter()));
    let _ = writeln!(out, "{}", form_line(board));
    out.push('\n');

    if board.is_loading() {
        out.push_str("Loading tasks...\n");
        return out;
    }

    let visible = board.visible_tasks();
    if visible.is_empty() {
        let empty = if board.connectivity() == Connectivity::Offline {
            "Connection Error"
        } else {
            "No tasks found"
        };
        let _ = writeln!(out, "{empty}");
        return out;
    }

    for (i, task) in visible.iter().enumerate() {
        out.push_str(&task_row(i + 1, task, board.is_expanded(&task.id)));
    }
    out
}

fn filter_tabs(active: TaskFilter) -> String {
    TaskFilter::ALL
        .iter()
        .map(|f| {
            if *f == active {
                format!("[{f}]")
            } else {
                format!(" {f} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn form_line(board: &Board) -> String {
    let form = board.form();
    if board.connectivity() == Connectivity::Offline {
        return "New task: (unavailable while offline)".to_string();
    }
    let title = if form.title.is_empty() {
        "What needs to be done?"
    } else {
        form.title.as_str()
    };
    format!("New task: {title}  ({})", form.priority)
}

/// One numbered task row plus its subtasks when expanded.
fn task_row(row: usize, task: &Task, expanded: bool) -> String {
    let check = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!(
        "{row:>3}. {check} {}  ({})  {}",
        task.title,
        task.priority,
        task.created_at.format("%Y-%m-%d")
    );
    if task.has_subtasks() && !expanded {
        let _ = write!(line, "  +{} subtasks", task.subtasks.len());
    }
    line.push('\n');
    if expanded {
        for subtask in &task.subtasks {
            let _ = writeln!(line, "        - {subtask}");
        }
    }
    line
}
