use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONTEXT_WINDOW, DEFAULT_FINAL_MAX_OUTPUT_TOKENS, DEFAULT_FINAL_TEMPERATURE,
    DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_SEARCH_COUNTRY,
    DEFAULT_SEARCH_LANGUAGE, DEFAULT_SERPAPI_ENDPOINT, DEFAULT_SERPAPI_KEY_ENV,
    DEFAULT_TEMPERATURE, DEFAULT_WEATHER_QUERY,
};

/// `[agent]` section: loop budget and model sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    pub max_iterations: u32,
    /// Number of history steps rendered into each reasoning prompt
    pub context_window: usize,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub final_temperature: f32,
    pub final_max_output_tokens: u32,
    /// Rewrite the final answer with the model once the loop finishes
    pub refine_final_answer: bool,
    /// Enable the keyword pre-processing stage
    pub preprocess: bool,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            context_window: DEFAULT_CONTEXT_WINDOW,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            final_temperature: DEFAULT_FINAL_TEMPERATURE,
            final_max_output_tokens: DEFAULT_FINAL_MAX_OUTPUT_TOKENS,
            refine_final_answer: true,
            preprocess: true,
        }
    }
}

/// `[search]` section: SerpAPI access and locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    /// `hl` parameter
    pub language: String,
    /// `gl` parameter
    pub country: String,
    /// Query used by the weather action; `{location}` is substituted
    pub weather_query: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SERPAPI_ENDPOINT.to_string(),
            api_key: Some(DEFAULT_SERPAPI_KEY_ENV.to_string()),
            language: DEFAULT_SEARCH_LANGUAGE.to_string(),
            country: DEFAULT_SEARCH_COUNTRY.to_string(),
            weather_query: DEFAULT_WEATHER_QUERY.to_string(),
        }
    }
}

impl SearchSettings {
    pub fn weather_query_for(&self, location: &str) -> String {
        self.weather_query.replace("{location}", location.trim())
    }
}

/// `[summarization]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizationSettings {
    /// Use the language model for the pre-processing summary, falling back
    /// to the extractive heuristic
    pub model_backed: bool,
    /// Model override; defaults to the agent's model
    pub model: Option<String>,
}

impl Default for SummarizationSettings {
    fn default() -> Self {
        Self {
            model_backed: true,
            model: None,
        }
    }
}
