//! Interactive line-oriented board.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use taskdeck_client::Board;
use taskdeck_client::view;
use taskdeck_core::{TaskFilter, TaskPriority};

const HELP: &str = "\
commands:
  add <title>        add a task with the current priority
  priority <level>   set the priority for new tasks (low, medium, high)
  toggle <task>      mark done / not done
  delete <task>      delete a task
  ai <task>          show or generate subtasks
  filter <name>      all, pending or completed
  refresh            reload from the server
  dismiss            clear the error message
  help               show this text
  quit               leave
<task> is a row number or a task id.";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Set the form title and submit.
    Add(String),
    /// Set the form priority.
    Priority(TaskPriority),
    /// Toggle a task.
    Toggle(String),
    /// Delete a task.
    Delete(String),
    /// Breakdown a task.
    Breakdown(String),
    /// Switch filter.
    Filter(TaskFilter),
    /// Reload.
    Refresh,
    /// Clear the error banner.
    Dismiss,
    /// Print help.
    Help,
    /// Leave the shell.
    Quit,
    /// Blank line.
    Nothing,
}

/// Parse a shell line. Errors are user-facing messages.
pub fn parse(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let need = |what: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("{word}: missing {what}"))
        } else {
            Ok(rest.to_string())
        }
    };

    match word.to_lowercase().as_str() {
        "" => Ok(ShellCommand::Nothing),
        "add" | "a" => need("title").map(ShellCommand::Add),
        "priority" | "p" => rest
            .parse()
            .map(ShellCommand::Priority)
            .map_err(|e| format!("{e}")),
        "toggle" | "t" | "done" => need("task").map(ShellCommand::Toggle),
        "delete" | "rm" | "d" => need("task").map(ShellCommand::Delete),
        "ai" | "breakdown" | "b" => need("task").map(ShellCommand::Breakdown),
        "filter" | "f" => rest
            .parse()
            .map(ShellCommand::Filter)
            .map_err(|e| format!("{e}")),
        "refresh" | "r" => Ok(ShellCommand::Refresh),
        "dismiss" | "x" => Ok(ShellCommand::Dismiss),
        "help" | "h" | "?" => Ok(ShellCommand::Help),
        "quit" | "q" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

/// Resolve `selector` on `board`, printing a message when nothing matches.
fn resolve(board: &Board, selector: &str) -> Option<String> {
    let id = board.resolve(selector);
    if id.is_none() {
        println!("no task '{selector}'");
    }
    id
}

/// Run the shell until `quit` or end of input.
pub async fn run(mut board: Board) -> Result<()> {
    board.load().await;
    print!("{}", view::render(&board));
    println!("type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            ShellCommand::Nothing => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ShellCommand::Add(title) => {
                board.set_title(title);
                board.add_task().await;
            }
            ShellCommand::Priority(priority) => board.set_priority(priority),
            ShellCommand::Filter(filter) => board.set_filter(filter),
            ShellCommand::Refresh => board.load().await,
            ShellCommand::Dismiss => board.dismiss_error(),
            ShellCommand::Toggle(selector) => {
                if let Some(id) = resolve(&board, &selector) {
                    board.toggle_completed(&id).await;
                }
            }
            ShellCommand::Delete(selector) => {
                if let Some(id) = resolve(&board, &selector) {
                    board.delete_task(&id).await;
                }
            }
            ShellCommand::Breakdown(selector) => {
                if let Some(id) = resolve(&board, &selector) {
                    board.breakdown(&id).await;
                }
            }
        }

        print!("{}", view::render(&board));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_keeps_full_title() {
        assert_eq!(
            parse("add  Buy oat milk ").unwrap(),
            ShellCommand::Add("Buy oat milk".into())
        );
    }

    #[test]
    fn parse_requires_arguments() {
        assert!(parse("add").unwrap_err().contains("missing title"));
        assert!(parse("toggle").unwrap_err().contains("missing task"));
    }

    #[test]
    fn parse_selectors() {
        assert_eq!(parse("t 2").unwrap(), ShellCommand::Toggle("2".into()));
        assert_eq!(parse("rm task-1").unwrap(), ShellCommand::Delete("task-1".into()));
        assert_eq!(parse("ai 1").unwrap(), ShellCommand::Breakdown("1".into()));
    }

    #[test]
    fn parse_filter_and_priority() {
        assert_eq!(
            parse("filter done").unwrap(),
            ShellCommand::Filter(TaskFilter::Completed)
        );
        assert_eq!(
            parse("priority HIGH").unwrap(),
            ShellCommand::Priority(TaskPriority::High)
        );
        assert!(parse("priority urgent").is_err());
    }

    #[test]
    fn parse_misc() {
        assert_eq!(parse("   ").unwrap(), ShellCommand::Nothing);
        assert_eq!(parse("Q").unwrap(), ShellCommand::Quit);
        assert_eq!(parse("refresh").unwrap(), ShellCommand::Refresh);
        assert_eq!(parse("dismiss").unwrap(), ShellCommand::Dismiss);
        assert!(parse("launch").unwrap_err().contains("unknown command"));
    }
}
