//! # taskdeck-server
//!
//! Axum HTTP server exposing the task list as a small REST resource under
//! `/api/tasks`, plus a `/health` check.

#![deny(unsafe_code)]

pub mod config;
pub mod errors;
pub mod health;
pub mod routes;
pub mod server;
pub mod shutdown;

pub use config::ServerConfig;
pub use errors::ApiError;
pub use server::{AppState, TaskServer};
pub use shutdown::ShutdownCoordinator;
