use crate::application::tooling::ActionRequest;

/// Parsed output of one reasoning step.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub thought: String,
    pub action: Option<ActionRequest>,
    pub should_continue: bool,
    pub final_answer: String,
}
