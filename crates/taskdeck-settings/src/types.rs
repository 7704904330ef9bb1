//! Settings types with compiled defaults.
//!
//! Every struct is `#[serde(default)]` so a partial settings file only needs
//! the keys it overrides.

use serde::{Deserialize, Serialize};

/// Root settings object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskdeckSettings {
    /// Task server settings.
    pub server: ServerSettings,
    /// Client settings.
    pub client: ClientSettings,
    /// AI subtask provider settings.
    pub ai: AiSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Task server settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Database file. Relative paths resolve against `~/.taskdeck`.
    pub db_path: String,
    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            db_path: "tasks.db".to_string(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Client settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientSettings {
    /// Base URL of the task collection endpoint.
    pub api_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000/api/tasks".to_string(),
        }
    }
}

/// AI subtask provider settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiSettings {
    /// Gemini model ID.
    pub model: String,
    /// API base URL.
    pub base_url: String,
    /// API key. Without one every breakdown uses the fallback list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
        }
    }
}

/// Logging settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive. `None` lets each command pick its default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults() {
        let s = ServerSettings::default();
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.port, 5000);
        assert_eq!(s.db_path, "tasks.db");
    }

    #[test]
    fn client_default_points_at_local_server() {
        assert_eq!(
            ClientSettings::default().api_url,
            "http://localhost:5000/api/tasks"
        );
    }

    #[test]
    fn ai_defaults_have_no_key() {
        let ai = AiSettings::default();
        assert_eq!(ai.model, "gemini-3-flash-preview");
        assert!(ai.api_key.is_none());
    }

    #[test]
    fn api_key_not_serialized_when_absent() {
        let value = serde_json::to_value(TaskdeckSettings::default()).unwrap();
        assert!(value["ai"].get("apiKey").is_none());
        assert!(value["logging"].get("level").is_none());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s: TaskdeckSettings = serde_json::from_str(r#"{"server":{"port":8080}}"#).unwrap();
        assert_eq!(s.server.port, 8080);
        assert_eq!(s.server.host, "127.0.0.1");
        assert_eq!(s.client, ClientSettings::default());
    }
}
