mod execution;
mod instructions;
mod parser;

use std::sync::Arc;

pub(super) use super::directive::Decision;
pub(super) use super::errors::{AgentError, ToolError};
pub(super) use crate::application::tooling::{Action, ActionOutput, ActionRequest, Toolkit};
pub(super) use serde_json::{Map, Value};

/// Parses model decisions, composes prompts and dispatches actions to a
/// [`Toolkit`].
pub struct ActionRuntime {
    toolkit: Arc<dyn Toolkit>,
}

impl ActionRuntime {
    pub fn new(toolkit: Arc<dyn Toolkit>) -> Self {
        Self { toolkit }
    }
}
