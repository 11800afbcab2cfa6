// Config loading tests - AppConfig::load through the public API
//
// Covers the shipped sample file, API key resolution and validation errors.

use astrolabe_core::config::{AppConfig, ConfigError, resolve_api_key};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("agent.toml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

fn sample_config_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("config")
        .join("agent.toml")
}

#[test]
fn shipped_sample_config_loads() {
    let config = AppConfig::load(Some(&sample_config_path())).expect("sample config loads");

    assert_eq!(config.default_provider, "gemini");
    assert_eq!(config.providers.len(), 2);
    assert_eq!(config.agent.max_iterations, 10);
    assert!(config.agent.preprocess);
    assert_eq!(
        config.search.weather_query_for("Hà Nội"),
        "thời tiết Hà Nội hôm nay"
    );

    let gemini = config.default_provider_config().expect("default provider");
    assert!(gemini.is_gemini());
    assert!(gemini.models.iter().any(|m| m.name == config.model));
}

#[test]
fn returns_error_when_file_not_found() {
    let result = AppConfig::load(Some(Path::new("/nonexistent/path/agent.toml")));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
fn returns_parse_error_for_invalid_toml() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "model = [unterminated");

    let result = AppConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn summarization_model_is_registered_with_default_provider() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        r#"
model = "llama3"
default_provider = "local"

[[providers]]
id = "local"
type = "ollama"
endpoint = "http://127.0.0.1:11434"

[summarization]
model = "phi3"
"#,
    );

    let config = AppConfig::load(Some(&path)).expect("load config");
    assert_eq!(config.summarization_model(), "phi3");
    let provider = config.default_provider_config().expect("provider");
    let names: Vec<&str> = provider.models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["llama3", "phi3"]);
}

#[test]
fn summarization_model_defaults_to_agent_model() {
    let config = AppConfig::from_toml_str("model = \"gemini-1.5-pro\"\n").expect("parse");
    assert_eq!(config.summarization_model(), "gemini-1.5-pro");
    assert!(config.summarization.model_backed);
}

#[test]
fn rejects_zero_iteration_budget() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "[agent]\nmax_iterations = 0\n");

    let result = AppConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::InvalidMaxIterations)));
}

#[test]
#[serial]
fn search_key_resolves_from_environment() {
    unsafe { env::set_var("ASTROLABE_IT_SERPAPI_KEY", "serp-secret") };
    let config = AppConfig::from_toml_str(
        r#"
[search]
api_key = "${ASTROLABE_IT_SERPAPI_KEY}"
"#,
    )
    .expect("parse");

    let key = resolve_api_key("serpapi", config.search.api_key.as_deref());
    unsafe { env::remove_var("ASTROLABE_IT_SERPAPI_KEY") };
    assert_eq!(key.as_deref(), Some("serp-secret"));
}
