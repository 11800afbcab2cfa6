use super::{ActionRuntime, AgentError};
use crate::application::agent::state::{HistoryStep, IntermediateResults, StepKind};
use crate::application::tooling::{ActionKind, truncate_chars};

const REWRITE_HISTORY_STEPS: usize = 6;
const REWRITE_STEP_CHARS: usize = 100;

impl ActionRuntime {
    pub fn reasoning_instructions(&self) -> String {
        let mut lines = vec![
            "You are a search agent that follows the ReAct pattern: think about the situation, then choose at most one action.".to_string(),
            "Available actions:".to_string(),
        ];

        for kind in ActionKind::ALL {
            lines.push(format!(
                "- {}: {}. Parameters: {}",
                kind.as_str(),
                kind.description(),
                kind.parameters_hint()
            ));
        }

        lines.extend([
            "Respond with a single JSON object and nothing else:".to_string(),
            r#"{"thought": "your reasoning about the current situation", "action": {"name": "action_name", "parameters": {"param": "value"}}, "should_continue": true, "final_answer": ""}"#.to_string(),
            "When you have enough information, set should_continue to false and put the answer in final_answer.".to_string(),
            "When more information is needed, pick a suitable action and set should_continue to true. Use \"action\": null if no action is needed.".to_string(),
            "Answer in the language the user wrote in.".to_string(),
        ]);

        lines.join("\n")
    }

    /// Context window plus intermediate results for one reasoning call.
    pub fn reasoning_prompt(
        &self,
        context: &str,
        intermediate: &IntermediateResults,
        current_date: &str,
    ) -> Result<String, AgentError> {
        let mut prompt = format!("Current date: {current_date}\n\n{context}");
        if !intermediate.is_empty() {
            let rendered = serde_json::to_string_pretty(intermediate)?;
            prompt.push_str(&format!("\nIntermediate Results:\n{rendered}\n"));
        }
        Ok(prompt)
    }

    pub fn final_response_prompt(
        &self,
        user_input: &str,
        history: &[HistoryStep],
        draft_answer: &str,
    ) -> String {
        let start = history.len().saturating_sub(REWRITE_HISTORY_STEPS);
        let reasoning: String = history[start..]
            .iter()
            .filter(|step| matches!(step.kind, StepKind::Thought | StepKind::Observation))
            .map(|step| truncate_chars(&step.content, REWRITE_STEP_CHARS))
            .map(|content| format!("- {content}...\n"))
            .collect();

        format!(
            "User question: {user_input}\n\n\
             Reasoning so far:\n{reasoning}\n\
             Draft answer: {draft_answer}\n\n\
             Write a short, clear final reply that answers the question directly \
             and keeps the most important facts. Use the user's language and avoid padding."
        )
    }
}
