use super::{ActionRequest, ActionRuntime, AgentError, Decision, Map, Value};
use tracing::warn;

const DEFAULT_THOUGHT: &str = "Thinking...";

impl ActionRuntime {
    pub fn parse_decision(&self, content: &str) -> Result<Decision, AgentError> {
        if let Some(value) = extract_json(content) {
            self.parse_decision_value(value)
        } else {
            Err(AgentError::InvalidResponse(
                "expected JSON object in agent response".into(),
            ))
        }
    }

    fn parse_decision_value(&self, value: Value) -> Result<Decision, AgentError> {
        match value {
            Value::Object(map) => Ok(Decision {
                thought: map
                    .get("thought")
                    .and_then(Value::as_str)
                    .filter(|thought| !thought.trim().is_empty())
                    .unwrap_or(DEFAULT_THOUGHT)
                    .to_string(),
                action: parse_action(map.get("action")),
                should_continue: map
                    .get("should_continue")
                    .and_then(Value::as_bool)
                    .unwrap_or(true),
                final_answer: map
                    .get("final_answer")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            }),
            Value::String(text) => self.parse_decision(&text),
            other => Err(AgentError::InvalidResponse(format!(
                "unsupported response type: {other}"
            ))),
        }
    }
}

/// A missing or malformed action means no action.
fn parse_action(value: Option<&Value>) -> Option<ActionRequest> {
    let value = value?;
    if value.is_null() {
        return None;
    }

    let Some(map) = value.as_object() else {
        warn!(action = %value, "Ignoring malformed action in agent response");
        return None;
    };

    let Some(name) = map
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
    else {
        warn!(action = %value, "Ignoring action without a name");
        return None;
    };

    let parameters = match map.get("parameters") {
        Some(Value::Object(parameters)) => parameters.clone(),
        Some(Value::Null) | None => Map::new(),
        Some(other) => {
            warn!(action = name, parameters = %other, "Ignoring non-object action parameters");
            Map::new()
        }
    };

    Some(ActionRequest::new(name, parameters))
}

pub(super) fn extract_json(content: &str) -> Option<Value> {
    let trimmed = content.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    if let Some(block) = fenced_block(trimmed)
        && let Ok(value) = serde_json::from_str::<Value>(block.trim())
    {
        return Some(value);
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}'))
        && start < end
        && let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..=end])
    {
        return Some(value);
    }

    None
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    let after = after
        .strip_prefix("json")
        .or_else(|| after.strip_prefix("JSON"))
        .unwrap_or(after);
    let end = after.find("```")?;
    Some(&after[..end])
}
