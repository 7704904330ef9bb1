//! Client error type.
//!
//! Each variant carries only the operation that failed. The underlying cause
//! (status, body, transport error) is logged at `debug` and dropped.

use thiserror::Error;

/// A failed task API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Listing tasks failed.
    #[error("Failed to fetch tasks")]
    Fetch,
    /// Creating a task failed.
    #[error("Failed to create task")]
    Create,
    /// Updating a task failed.
    #[error("Failed to update task")]
    Update,
    /// Deleting a task failed.
    #[error("Failed to delete task")]
    Delete,
}
