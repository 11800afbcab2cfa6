use crate::infrastructure::search::SearchError;
use thiserror::Error;

/// Failure of an action implementation itself.
#[derive(Debug, Error)]
pub enum ToolInvokeError {
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Failure to dispatch or run a requested action.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown action requested: {0}")]
    UnknownAction(String),
    #[error("invalid parameters for action '{action}': {reason}")]
    InvalidParameters { action: String, reason: String },
    #[error("failed to execute action '{action}': {source}")]
    Execution {
        action: String,
        #[source]
        source: ToolInvokeError,
    },
}

impl ToolError {
    /// Name of the action the failure belongs to
    pub fn action(&self) -> &str {
        match self {
            ToolError::UnknownAction(name) => name,
            ToolError::InvalidParameters { action, .. } | ToolError::Execution { action, .. } => {
                action
            }
        }
    }
}
