//! # taskdeck-settings
//!
//! Configuration with layered sources.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`TaskdeckSettings::default()`]
//! 2. **User file**: `~/.taskdeck/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `TASKDECK_*` and `GEMINI_API_KEY`
//!
//! The binary applies command-line flags on top of the result.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    data_dir, deep_merge, load_settings, load_settings_from_path, resolve_db_path, settings_path,
};
pub use types::{AiSettings, ClientSettings, LoggingSettings, ServerSettings, TaskdeckSettings};
