//! Provider factory - creates clients from config

use super::clients::{GeminiClient, OllamaClient, OpenAIClient};
use super::traits::ModelClient;
use crate::config::ModelProviderConfig;

/// Factory for creating model clients from provider config.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Creates a model client based on provider type.
    ///
    /// Supported types:
    /// - `ollama`, `localai` → Ollama format
    /// - `gemini`, `google` → Gemini format
    /// - Others → OpenAI-compatible format (default)
    pub fn create(config: &ModelProviderConfig) -> Box<dyn ModelClient> {
        match config.provider_type.to_lowercase().as_str() {
            "ollama" | "localai" => Box::new(OllamaClient::from_config(config)),
            "gemini" | "google" | "google-ai" => Box::new(GeminiClient::from_config(config)),
            _ => Box::new(OpenAIClient::from_config(config)),
        }
    }
}
