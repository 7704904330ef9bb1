//! # taskdeck-ai
//!
//! Subtask suggestions for a task title.
//!
//! [`GeminiSubtaskProvider`] asks Gemini for 4-6 short actionable steps and
//! falls back to [`FALLBACK_SUBTASKS`] on any failure, so callers of
//! [`SubtaskProvider::suggest_subtasks`] never see an error.

#![deny(unsafe_code)]

pub mod gemini;
pub mod provider;
pub mod types;

pub use gemini::GeminiSubtaskProvider;
pub use provider::{ProviderError, ProviderResult, SubtaskProvider};
pub use types::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, FALLBACK_SUBTASKS, GeminiConfig, fallback_subtasks,
};
