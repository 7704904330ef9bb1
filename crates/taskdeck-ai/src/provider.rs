//! Subtask provider trait and error types.

use async_trait::async_trait;

/// Errors from a generation request.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No usable credentials.
    #[error("Auth error: {message}")]
    Auth {
        /// Error description.
        message: String,
    },

    /// Provider returned an API error.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
}

/// Convenience type alias for provider results.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Source of suggested subtasks for a task title.
///
/// Implementations never fail: on any error they return a fallback list.
#[async_trait]
pub trait SubtaskProvider: Send + Sync {
    /// Suggest subtasks for `title`.
    async fn suggest_subtasks(&self, title: &str) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = ProviderError::Api {
            status: 503,
            message: "overloaded".into(),
        };
        assert_eq!(err.to_string(), "API error (503): overloaded");
    }

    #[test]
    fn json_error_converts() {
        let json_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err: ProviderError = json_err.into();
        assert!(matches!(err, ProviderError::Json(_)));
    }
}
