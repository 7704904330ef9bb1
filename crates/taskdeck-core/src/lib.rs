//! # taskdeck-core
//!
//! Domain types shared by every taskdeck crate, plus the `tracing`
//! subscriber setup used by the binary.
//!
//! - [`Task`] and its wire-level create/update parameter types
//! - [`TaskPriority`] and the view-only [`TaskFilter`]
//! - [`TaskStats`] summary counts derived from a task list

#![deny(unsafe_code)]

pub mod logging;
pub mod types;

pub use types::{
    ParseFilterError, ParsePriorityError, Task, TaskCreateParams, TaskFilter, TaskPriority,
    TaskStats, TaskUpdateParams,
};
