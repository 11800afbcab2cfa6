//! Application constants
//!
//! Single source of truth for paths, endpoints and agent defaults.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/agent.toml";

/// Environment files, tried in order
pub const ENV_PATHS: [&str; 2] = ["config/.env", ".env"];

pub const DEFAULT_PROVIDER_ID: &str = "gemini";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default Gemini API path (fallback when not specified in config)
pub const DEFAULT_GEMINI_API_PATH: &str = "v1beta/models";

pub const DEFAULT_SERPAPI_ENDPOINT: &str = "https://serpapi.com";
pub const DEFAULT_SERPAPI_KEY_ENV: &str = "SERPAPI_KEY";
pub const DEFAULT_SEARCH_LANGUAGE: &str = "vi";
pub const DEFAULT_SEARCH_COUNTRY: &str = "vn";
pub const DEFAULT_WEATHER_QUERY: &str = "thời tiết {location} hôm nay";

pub const DEFAULT_MAX_ITERATIONS: u32 = 10;
pub const DEFAULT_CONTEXT_WINDOW: usize = 6;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;
pub const DEFAULT_FINAL_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_FINAL_MAX_OUTPUT_TOKENS: u32 = 512;

pub const DEFAULT_SEARCH_RESULTS: usize = 10;
pub const DEFAULT_SUMMARY_LENGTH: usize = 150;

/// Key under which the keyword pre-processing stage stores its result
pub const ADVANCED_RESULT_KEY: &str = "advanced";

/// Format used for the `current_date` handed to the answer action
pub const CURRENT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
