//! # taskdeck
//!
//! Task list with AI-suggested subtasks. `taskdeck serve` runs the REST
//! server; every other subcommand is a client of it.

#![deny(unsafe_code)]

mod shell;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use taskdeck_ai::{GeminiConfig, GeminiSubtaskProvider};
use taskdeck_client::{Board, Connectivity, HttpTaskClient, view};
use taskdeck_core::logging::{DEFAULT_CLIENT_LEVEL, DEFAULT_SERVER_LEVEL, init_subscriber};
use taskdeck_core::{TaskFilter, TaskPriority};
use taskdeck_server::{ServerConfig, TaskServer};
use taskdeck_settings::TaskdeckSettings;
use taskdeck_store::connection::{self, ConnectionConfig};

/// Task list with AI-suggested subtasks.
#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about = "Task list with AI-suggested subtasks")]
struct Cli {
    /// Task collection URL (overrides settings).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Settings file (default `~/.taskdeck/settings.json`).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the REST server.
    Serve {
        /// Host to bind.
        #[arg(long)]
        host: Option<String>,
        /// Port to bind.
        #[arg(long)]
        port: Option<u16>,
        /// Path to the `SQLite` database.
        #[arg(long)]
        db_path: Option<PathBuf>,
    },
    /// Show the board.
    List {
        /// all, pending or completed.
        #[arg(long, default_value = "all")]
        filter: TaskFilter,
    },
    /// Add a task.
    Add {
        /// What needs doing.
        title: String,
        /// low, medium or high.
        #[arg(long, default_value = "medium")]
        priority: TaskPriority,
    },
    /// Mark a task done or not done.
    Toggle {
        /// Row number or task id.
        task: String,
    },
    /// Delete a task.
    Delete {
        /// Row number or task id.
        task: String,
    },
    /// Show or generate AI subtasks for a task.
    Breakdown {
        /// Row number or task id.
        task: String,
    },
    /// Interactive board.
    Shell,
}

fn load_settings(path: Option<&Path>) -> Result<TaskdeckSettings> {
    match path {
        Some(path) => taskdeck_settings::load_settings_from_path(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => taskdeck_settings::load_settings().context("Failed to load settings"),
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_deref())?;

    let default_level = match cli.command {
        Command::Serve { .. } => DEFAULT_SERVER_LEVEL,
        _ => DEFAULT_CLIENT_LEVEL,
    };
    init_subscriber(settings.logging.level.as_deref().unwrap_or(default_level));

    match cli.command {
        Command::Serve {
            host,
            port,
            db_path,
        } => serve(&settings, host, port, db_path).await,
        command => {
            let api_url = cli.api_url.unwrap_or_else(|| settings.client.api_url.clone());
            let board = make_board(&settings, api_url);
            run_client(board, command).await
        }
    }
}

async fn serve(
    settings: &TaskdeckSettings,
    host: Option<String>,
    port: Option<u16>,
    db_path: Option<PathBuf>,
) -> Result<()> {
    let db_path = db_path.unwrap_or_else(|| taskdeck_settings::resolve_db_path(settings));
    ensure_parent_dir(&db_path)?;
    let db_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not UTF-8: {}", db_path.display()))?;

    let pool = connection::open(db_str, &ConnectionConfig::default())
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    info!(path = %db_path.display(), "task database ready");

    let config = ServerConfig {
        host: host.unwrap_or_else(|| settings.server.host.clone()),
        port: port.unwrap_or(settings.server.port),
        max_body_bytes: settings.server.max_body_bytes,
    };
    let server = TaskServer::new(config, pool);
    let listener = server
        .bind()
        .await
        .with_context(|| format!("Failed to bind {}", server.config().bind_addr()))?;

    server.shutdown().shutdown_on_ctrl_c();
    server.serve(listener).await.context("Server error")
}

fn make_board(settings: &TaskdeckSettings, api_url: String) -> Board {
    let api = Arc::new(HttpTaskClient::new(api_url));
    let ai = Arc::new(GeminiSubtaskProvider::new(GeminiConfig {
        model: settings.ai.model.clone(),
        base_url: settings.ai.base_url.clone(),
        api_key: settings.ai.api_key.clone(),
    }));
    Board::new(api, ai)
}

async fn run_client(mut board: Board, command: Command) -> Result<()> {
    if matches!(command, Command::Shell) {
        return shell::run(board).await;
    }

    board.load().await;
    if board.connectivity() == Connectivity::Offline {
        print!("{}", view::render(&board));
        bail!("backend unreachable at {}", board.address());
    }

    match command {
        Command::List { filter } => board.set_filter(filter),
        Command::Add { title, priority } => {
            board.set_title(title);
            board.set_priority(priority);
            if !board.form().has_title() {
                bail!("title must not be empty");
            }
            board.add_task().await;
        }
        Command::Toggle { task } => {
            let id = resolve(&board, &task)?;
            board.toggle_completed(&id).await;
        }
        Command::Delete { task } => {
            let id = resolve(&board, &task)?;
            board.delete_task(&id).await;
        }
        Command::Breakdown { task } => {
            let id = resolve(&board, &task)?;
            board.breakdown(&id).await;
        }
        Command::Serve { .. } | Command::Shell => {}
    }

    print!("{}", view::render(&board));
    if let Some(message) = board.error_message() {
        bail!("{message}");
    }
    Ok(())
}

fn resolve(board: &Board, selector: &str) -> Result<String> {
    board
        .resolve(selector)
        .with_context(|| format!("No task matches '{selector}'"))
}
