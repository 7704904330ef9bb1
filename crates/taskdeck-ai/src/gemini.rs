//! Gemini-backed [`SubtaskProvider`].
//!
//! Sends one non-streaming `generateContent` request with API-key auth and a
//! JSON response schema. No timeout and no retry.

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::provider::{ProviderError, ProviderResult, SubtaskProvider};
use crate::types::{
    GeminiConfig, GenerateContentRequest, GenerateContentResponse, fallback_subtasks,
};

/// Gemini subtask provider.
pub struct GeminiSubtaskProvider {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiSubtaskProvider {
    /// Create a provider with its own HTTP client.
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create a provider with a shared HTTP client.
    #[must_use]
    pub fn with_client(config: GeminiConfig, client: reqwest::Client) -> Self {
        info!(
            model = %config.model,
            has_key = config.api_key.as_deref().is_some_and(|k| !k.is_empty()),
            "Gemini subtask provider initialized"
        );
        Self { config, client }
    }

    fn api_key(&self) -> ProviderResult<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProviderError::Auth {
                message: "no Gemini API key configured".to_string(),
            })
    }

    fn api_url(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={api_key}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Run one generation request.
    ///
    /// A successful reply with no text yields an empty list. Any other text
    /// that is not a JSON array of strings, whitespace included, is an error.
    #[instrument(skip(self), fields(model = %self.config.model))]
    pub async fn generate(&self, title: &str) -> ProviderResult<Vec<String>> {
        let api_key = self.api_key()?;
        let url = self.api_url(api_key);
        let body = GenerateContentRequest::for_title(title);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            // The URL carries the key
            .map_err(|e| ProviderError::Http(e.without_url()))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| ProviderError::Http(e.without_url()))?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: parse_api_error(&body_text, status.as_u16()),
            });
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&body_text)?;
        let Some(text) = envelope.text() else {
            debug!("Gemini returned no text");
            return Ok(Vec::new());
        };

        let subtasks: Vec<String> = serde_json::from_str(text.trim())?;
        debug!(count = subtasks.len(), "Gemini suggested subtasks");
        Ok(subtasks)
    }
}

#[async_trait]
impl SubtaskProvider for GeminiSubtaskProvider {
    async fn suggest_subtasks(&self, title: &str) -> Vec<String> {
        match self.generate(title).await {
            Ok(subtasks) => subtasks,
            Err(e) => {
                warn!(error = %e, "subtask generation failed, using fallback");
                fallback_subtasks()
            }
        }
    }
}

/// Extract a message from a Gemini error body.
fn parse_api_error(body: &str, status: u16) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| format!("HTTP {status}: {body}"))
}
