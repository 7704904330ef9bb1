//! Server configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the task server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `5000`; `0` auto-assigns).
    pub port: u16,
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
            max_body_bytes: 1024 * 1024, // 1 MiB
        }
    }
}

impl ServerConfig {
    /// `host:port` string to bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
