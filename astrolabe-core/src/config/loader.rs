use super::CONFIG_PATH;
use super::app::AppConfig;
use super::error::ConfigError;
use super::provider::{ModelProviderConfig, RawProviderConfig};
use super::settings::{AgentSettings, SearchSettings, SummarizationSettings};
use crate::constants::{DEFAULT_MODEL, DEFAULT_PROVIDER_ID, ENV_PATHS};
use dotenvy::from_filename;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use tracing::{debug, info};

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    model: Option<String>,
    default_provider: Option<String>,
    providers: Option<Vec<RawProviderConfig>>,
    #[serde(default)]
    agent: AgentSettings,
    #[serde(default)]
    search: SearchSettings,
    #[serde(default)]
    summarization: SummarizationSettings,
}

/// Ensures environment variables are loaded from the known `.env` files
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        for path in ENV_PATHS {
            if from_filename(path).is_ok() {
                debug!(path, "Loaded environment file");
            }
        }
    });
}

/// Load and validate configuration from a file path
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    if let Some(path) = path {
        return read_config(path);
    }

    match read_config(Path::new(CONFIG_PATH)) {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound { .. }) => {
            info!("Configuration file not found; using defaults");
            Ok(AppConfig::default())
        }
        Err(other) => Err(other),
    }
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading agent configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&content, path)
}

pub(super) fn parse_config(content: &str, origin: &Path) -> Result<AppConfig, ConfigError> {
    let parsed: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;

    validate_and_build(parsed)
}

fn validate_and_build(parsed: RawConfig) -> Result<AppConfig, ConfigError> {
    if parsed.agent.max_iterations == 0 {
        return Err(ConfigError::InvalidMaxIterations);
    }

    let model = match parsed.model {
        Some(model) if model.trim().is_empty() => return Err(ConfigError::MissingModel),
        Some(model) => model,
        None => DEFAULT_MODEL.to_string(),
    };
    let default_provider = parsed
        .default_provider
        .unwrap_or_else(|| DEFAULT_PROVIDER_ID.to_string());

    let mut providers = match parsed.providers {
        None => vec![ModelProviderConfig::default_gemini()],
        Some(raw) if raw.is_empty() => return Err(ConfigError::NoProvidersConfigured),
        Some(raw) => {
            let mut providers = Vec::with_capacity(raw.len());
            for raw_provider in raw {
                if raw_provider
                    .endpoint
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .is_empty()
                {
                    return Err(ConfigError::MissingEndpoint {
                        provider: raw_provider.id.clone(),
                    });
                }
                providers.push(ModelProviderConfig::from(raw_provider));
            }
            providers
        }
    };

    let Some(provider) = providers.iter_mut().find(|p| p.id == default_provider) else {
        return Err(ConfigError::ProviderNotFound {
            provider: default_provider,
        });
    };
    provider.ensure_model(&model);
    if let Some(summary_model) = parsed.summarization.model.as_deref() {
        provider.ensure_model(summary_model);
    }

    Ok(AppConfig {
        default_provider,
        model,
        providers,
        agent: parsed.agent,
        search: parsed.search,
        summarization: parsed.summarization,
    })
}
