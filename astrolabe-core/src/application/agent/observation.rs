use super::errors::ToolError;
use crate::application::tooling::{ActionOutput, truncate_chars};
use serde_json::Value;

const OBSERVATION_PREVIEW_CHARS: usize = 300;

/// Render the outcome of an action attempt as observation text.
pub fn format_observation(result: &Result<ActionOutput, ToolError>) -> String {
    match result {
        Ok(output) => match serde_json::to_value(output) {
            Ok(value) => describe_value(&value),
            Err(err) => format!("Action failed: {err}"),
        },
        Err(err) => format!("Action failed: {err}"),
    }
}

/// Objects carrying a `success` flag are reported as success or failure;
/// anything else is stringified.
pub fn describe_value(value: &Value) -> String {
    let Value::Object(map) = value else {
        let text = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        return format!(
            "Action result: {}...",
            truncate_chars(&text, OBSERVATION_PREVIEW_CHARS)
        );
    };

    if map.get("success").and_then(Value::as_bool).unwrap_or(true) {
        let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        format!(
            "Action executed successfully. Result: {}...",
            truncate_chars(&pretty, OBSERVATION_PREVIEW_CHARS)
        )
    } else {
        let error = map
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");
        format!("Action failed: {error}")
    }
}
