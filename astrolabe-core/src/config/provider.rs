//! # Provider Configuration
//!
//! Model providers the reasoning loop can talk to.
//!
//! | Type | Description | API Key Required |
//! |------|-------------|-----------------|
//! | `gemini` | Google Gemini API | Yes |
//! | `openai` | OpenAI-compatible APIs | Yes |
//! | `ollama` | Local Ollama server | No |

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GEMINI_API_KEY_ENV, DEFAULT_GEMINI_ENDPOINT, DEFAULT_MODEL, DEFAULT_PROVIDER_ID,
};

/// Information about an available model from a provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelInfo {
    /// Model identifier used in API calls (e.g., "gemini-2.0-flash")
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Configuration for a model provider.
///
/// # Example
///
/// ```toml
/// [[providers]]
/// id = "gemini"
/// type = "gemini"
/// endpoint = "https://generativelanguage.googleapis.com"
/// api_key = "GEMINI_API_KEY"
/// models = ["gemini-2.0-flash-exp"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelProviderConfig {
    /// Unique identifier for this provider (e.g., "gemini", "ollama-local")
    pub id: String,
    /// The provider type determines API format: "ollama", "gemini", "openai"
    #[serde(rename = "type")]
    pub provider_type: String,
    pub endpoint: String,
    /// Name of the environment variable holding the key, or `${VAR}` syntax
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API path override (e.g., "v1beta/models" for Gemini)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_path: Option<String>,
    pub models: Vec<ModelInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct RawProviderConfig {
    pub(super) id: String,
    #[serde(rename = "type", default)]
    pub(super) provider_type: String,
    pub(super) endpoint: Option<String>,
    pub(super) api_key: Option<String>,
    #[serde(default)]
    pub(super) api_path: Option<String>,
    #[serde(default)]
    pub(super) models: Vec<RawModelInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum RawModelInfo {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        display_name: Option<String>,
    },
}

impl From<RawModelInfo> for ModelInfo {
    fn from(value: RawModelInfo) -> Self {
        match value {
            RawModelInfo::Name(name) => Self {
                name,
                display_name: None,
            },
            RawModelInfo::Detailed { name, display_name } => Self { name, display_name },
        }
    }
}

impl From<RawProviderConfig> for ModelProviderConfig {
    fn from(raw: RawProviderConfig) -> Self {
        let provider_type = if raw.provider_type.trim().is_empty() {
            raw.id.clone()
        } else {
            raw.provider_type
        };

        Self {
            id: raw.id,
            provider_type,
            endpoint: raw.endpoint.unwrap_or_default(),
            api_key: raw.api_key,
            api_path: raw.api_path,
            models: raw.models.into_iter().map(ModelInfo::from).collect(),
        }
    }
}

impl ModelProviderConfig {
    /// The provider used when no configuration file exists.
    pub fn default_gemini() -> Self {
        Self {
            id: DEFAULT_PROVIDER_ID.to_string(),
            provider_type: "gemini".to_string(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            api_key: Some(DEFAULT_GEMINI_API_KEY_ENV.to_string()),
            api_path: None,
            models: vec![ModelInfo {
                name: DEFAULT_MODEL.to_string(),
                display_name: Some("Gemini 2.0 Flash".to_string()),
            }],
        }
    }

    /// Ensure a model exists in this provider's model list
    pub fn ensure_model(&mut self, model: &str) {
        if self.models.iter().all(|info| info.name != model) {
            self.models.push(ModelInfo {
                name: model.to_string(),
                display_name: None,
            });
        }
    }

    /// Check if this is an Ollama provider (case-insensitive).
    pub fn is_ollama(&self) -> bool {
        self.provider_type.eq_ignore_ascii_case("ollama")
    }

    /// Check if this is a Gemini provider (case-insensitive).
    pub fn is_gemini(&self) -> bool {
        matches!(
            self.provider_type.to_lowercase().as_str(),
            "gemini" | "google" | "google-ai"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_type_falls_back_to_id() {
        let raw = RawProviderConfig {
            id: "ollama".into(),
            provider_type: String::new(),
            endpoint: Some("http://127.0.0.1:11434".into()),
            api_key: None,
            api_path: None,
            models: vec![RawModelInfo::Name("llama3".into())],
        };

        let config = ModelProviderConfig::from(raw);
        assert!(config.is_ollama());
        assert_eq!(config.models[0].name, "llama3");
    }

    #[test]
    fn ensure_model_does_not_duplicate() {
        let mut config = ModelProviderConfig::default_gemini();
        config.ensure_model(DEFAULT_MODEL);
        config.ensure_model("gemini-1.5-pro");
        assert_eq!(config.models.len(), 2);
        assert!(config.is_gemini());
    }
}
