//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`TaskdeckSettings::default()`]
//! 2. If `~/.taskdeck/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::TaskdeckSettings;

/// Resolve the taskdeck data directory (`~/.taskdeck`).
pub fn data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".taskdeck")
}

/// Resolve the path to the settings file (`~/.taskdeck/settings.json`).
pub fn settings_path() -> PathBuf {
    data_dir().join("settings.json")
}

/// Resolve the configured database path against the data directory.
pub fn resolve_db_path(settings: &TaskdeckSettings) -> PathBuf {
    let configured = Path::new(&settings.server.db_path);
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        data_dir().join(configured)
    }
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<TaskdeckSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<TaskdeckSettings> {
    let mut settings = read_settings_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Load settings from a file without consulting the environment.
pub fn read_settings_file(path: &Path) -> Result<TaskdeckSettings> {
    let defaults = serde_json::to_value(TaskdeckSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply process environment overrides to loaded settings.
pub fn apply_env_overrides(settings: &mut TaskdeckSettings) {
    apply_overrides_with(settings, |name| std::env::var(name).ok());
}

/// Apply overrides using `lookup` as the variable source.
///
/// Empty values are treated as unset. Values that fail to parse are ignored
/// with a warning and the file/default value is kept.
pub fn apply_overrides_with<F>(settings: &mut TaskdeckSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    // ── Server ──────────────────────────────────────────────────────
    if let Some(v) = read("TASKDECK_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = read("TASKDECK_PORT") {
        match parse_u16_range(&v, 1, 65535) {
            Some(port) => settings.server.port = port,
            None => {
                tracing::warn!(key = "TASKDECK_PORT", value = %v, "invalid port env var, ignoring");
            }
        }
    }
    if let Some(v) = read("TASKDECK_DB_PATH") {
        settings.server.db_path = v;
    }

    // ── Client ──────────────────────────────────────────────────────
    if let Some(v) = read("TASKDECK_API_URL") {
        settings.client.api_url = v;
    }

    // ── AI ──────────────────────────────────────────────────────────
    if let Some(v) = read("TASKDECK_AI_MODEL") {
        settings.ai.model = v;
    }
    if let Some(v) = read("TASKDECK_AI_BASE_URL") {
        settings.ai.base_url = v;
    }
    if let Some(v) = read("GEMINI_API_KEY").or_else(|| read("API_KEY")) {
        settings.ai.api_key = Some(v);
    }

    // ── Logging ─────────────────────────────────────────────────────
    if let Some(v) = read("TASKDECK_LOG_LEVEL") {
        settings.logging.level = Some(v);
    }
}

/// Parse a string as a `u16` within a range.
pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}
