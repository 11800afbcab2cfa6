use super::error::ConfigError;
use super::provider::ModelProviderConfig;
use super::settings::{AgentSettings, SearchSettings, SummarizationSettings};
use crate::constants::{DEFAULT_MODEL, DEFAULT_PROVIDER_ID};
use std::path::Path;

/// Application configuration loaded from agent.toml
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_provider: String,
    pub model: String,
    pub providers: Vec<ModelProviderConfig>,
    pub agent: AgentSettings,
    pub search: SearchSettings,
    pub summarization: SummarizationSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: DEFAULT_PROVIDER_ID.to_string(),
            model: DEFAULT_MODEL.to_string(),
            providers: vec![ModelProviderConfig::default_gemini()],
            agent: AgentSettings::default(),
            search: SearchSettings::default(),
            summarization: SummarizationSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file path, or from the default path when
    /// `None`. A missing default file yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        super::loader::parse_config(content, Path::new("<inline>"))
    }

    pub fn default_provider_config(&self) -> Option<&ModelProviderConfig> {
        self.providers
            .iter()
            .find(|p| p.id == self.default_provider)
    }

    /// Model used for the model-backed summariser
    pub fn summarization_model(&self) -> &str {
        self.summarization.model.as_deref().unwrap_or(&self.model)
    }
}
