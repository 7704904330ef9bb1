//! # taskdeck-client
//!
//! Everything the CLI front-end needs to talk to a taskdeck server:
//!
//! - [`api`]: the [`TaskApi`] seam and its REST implementation
//! - [`board`]: the owned [`Board`] state container and its transitions
//! - [`view`]: plain-text rendering of a board

#![deny(unsafe_code)]

pub mod api;
pub mod board;
pub mod errors;
pub mod view;

pub use api::{DEFAULT_API_URL, HttpTaskClient, TaskApi};
pub use board::{Board, Connectivity, TaskForm};
pub use errors::ClientError;
