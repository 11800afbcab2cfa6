//! # Configuration
//!
//! Agent configuration is an explicit [`AppConfig`] value loaded from
//! `config/agent.toml` (see [`CONFIG_PATH`]) and handed to the agent at
//! construction time. Secrets never live in the file: API key fields name an
//! environment variable (or use `${VAR}` syntax), and `config/.env` / `.env`
//! are loaded once before the file is read.

pub mod app;
pub mod error;
pub mod loader;
pub mod provider;
pub mod secret;
pub mod settings;

pub use crate::constants::CONFIG_PATH;
pub use app::AppConfig;
pub use error::ConfigError;
pub use loader::ensure_env_loaded;
pub use provider::{ModelInfo, ModelProviderConfig};
pub use secret::resolve_api_key;
pub use settings::{AgentSettings, SearchSettings, SummarizationSettings};
