use super::state::{AgentState, AgentStatus, HistoryStep, IntermediateResults, StateSummary};
use crate::config::AppConfig;
use crate::constants::{
    DEFAULT_CONTEXT_WINDOW, DEFAULT_FINAL_MAX_OUTPUT_TOKENS, DEFAULT_FINAL_TEMPERATURE,
    DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_PROVIDER_ID,
    DEFAULT_TEMPERATURE,
};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct AgentOptions {
    pub provider: String,
    pub model: String,
    pub max_iterations: u32,
    pub context_window: usize,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub final_temperature: f32,
    pub final_max_output_tokens: u32,
    pub refine_final_answer: bool,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER_ID.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            context_window: DEFAULT_CONTEXT_WINDOW,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            final_temperature: DEFAULT_FINAL_TEMPERATURE,
            final_max_output_tokens: DEFAULT_FINAL_MAX_OUTPUT_TOKENS,
            refine_final_answer: true,
        }
    }
}

impl AgentOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        let agent = &config.agent;
        Self {
            provider: config.default_provider.clone(),
            model: config.model.clone(),
            max_iterations: agent.max_iterations,
            context_window: agent.context_window,
            temperature: agent.temperature,
            max_output_tokens: agent.max_output_tokens,
            final_temperature: agent.final_temperature,
            final_max_output_tokens: agent.final_max_output_tokens,
            refine_final_answer: agent.refine_final_answer,
        }
    }
}

/// Result record of one run.
#[derive(Debug, Clone, Serialize)]
pub struct AgentOutcome {
    pub success: bool,
    pub run_id: String,
    pub user_input: String,
    pub final_answer: String,
    pub total_iterations: u32,
    pub execution_time: f64,
    pub status: AgentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub history: Vec<HistoryStep>,
    pub intermediate_results: IntermediateResults,
    pub summary: StateSummary,
}

#[derive(Debug, Error)]
pub enum OutcomeWriteError {
    #[error("failed to encode agent result: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write agent result to {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AgentOutcome {
    pub(crate) fn from_state(run_id: String, state: AgentState) -> Self {
        let parts = state.into_parts();
        Self {
            success: parts.status != AgentStatus::Error,
            run_id,
            user_input: parts.user_input,
            final_answer: parts.final_answer,
            total_iterations: parts.iteration,
            execution_time: parts.execution_time,
            status: parts.status,
            error: parts.error,
            history: parts.history,
            intermediate_results: parts.intermediate_results,
            summary: parts.summary,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the record as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), OutcomeWriteError> {
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(|source| OutcomeWriteError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
