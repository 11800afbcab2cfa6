use crate::infrastructure::model::ModelError;
use thiserror::Error;

pub use crate::application::tooling::ToolError;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("invalid agent response: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

