//! Gemini request/response types and provider configuration.

use serde::{Deserialize, Serialize};

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Default base URL for API-key access to the Gemini API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Suggestions returned whenever generation fails.
pub const FALLBACK_SUBTASKS: [&str; 4] = [
    "Research how to start",
    "Prepare necessary tools",
    "Execute the main steps",
    "Review and finalize",
];

/// The fallback list as owned strings.
#[must_use]
pub fn fallback_subtasks() -> Vec<String> {
    FALLBACK_SUBTASKS.iter().map(ToString::to_string).collect()
}

/// Prompt sent for a task title.
#[must_use]
pub fn subtask_prompt(title: &str) -> String {
    format!(
        "Provide a list of 4-6 small, actionable, and logical subtasks for the task: \
         \"{title}\". Return only a clean JSON array of strings."
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Gemini provider configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeminiConfig {
    /// Model ID.
    pub model: String,
    /// API base URL (no trailing slash needed).
    pub base_url: String,
    /// API key. Requests fail without one.
    pub api_key: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl GeminiConfig {
    /// Default model and endpoint with the given key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gemini API types
// ─────────────────────────────────────────────────────────────────────────────

/// A content part. Only text parts are used here.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Content message in Gemini API format.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    /// The role (`user` or `model`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content parts.
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// Generation settings forcing a JSON array-of-strings reply.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Response MIME type.
    pub response_mime_type: String,
    /// Response schema in Gemini's OpenAPI subset.
    pub response_schema: serde_json::Value,
}

impl GenerationConfig {
    /// Config asking for `string[]` JSON.
    #[must_use]
    pub fn string_array() -> Self {
        Self {
            response_mime_type: "application/json".to_string(),
            response_schema: serde_json::json!({
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }),
        }
    }
}

/// `generateContent` request body.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents.
    pub contents: Vec<GeminiContent>,
    /// Generation settings.
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Single-turn request for a task breakdown.
    #[must_use]
    pub fn for_title(title: &str) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(subtask_prompt(title)),
                }],
            }],
            generation_config: GenerationConfig::string_array(),
        }
    }
}

/// A response candidate.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// The content of this candidate.
    #[serde(default)]
    pub content: Option<GeminiContent>,
    /// Finish reason (e.g., `STOP`, `SAFETY`).
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// `generateContent` response body.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    /// Response candidates.
    #[serde(default)]
    pub candidates: Option<Vec<GeminiCandidate>>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    ///
    /// Whitespace-only text is returned as is and fails to parse later.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.as_ref()?.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
