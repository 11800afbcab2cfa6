use super::current_date;
use super::error::ToolError;
use crate::constants::{DEFAULT_SEARCH_RESULTS, DEFAULT_SUMMARY_LENGTH};
use crate::infrastructure::search::SearchHit;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

/// The fixed set of actions available to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Search,
    ExtractWeather,
    Summarize,
    Answer,
    NoOp,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Search,
        ActionKind::ExtractWeather,
        ActionKind::Summarize,
        ActionKind::Answer,
        ActionKind::NoOp,
    ];

    /// Resolve a model-supplied action name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "search_action" | "search" => Some(ActionKind::Search),
            "extract_weather_data" | "extract_weather" | "weather" => {
                Some(ActionKind::ExtractWeather)
            }
            "summarize_action" | "summarize" => Some(ActionKind::Summarize),
            "answer_question" | "answer" => Some(ActionKind::Answer),
            "do_nothing" | "no_op" => Some(ActionKind::NoOp),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Search => "search_action",
            ActionKind::ExtractWeather => "extract_weather_data",
            ActionKind::Summarize => "summarize_action",
            ActionKind::Answer => "answer_question",
            ActionKind::NoOp => "do_nothing",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ActionKind::Search => "Search the web for information",
            ActionKind::ExtractWeather => "Look up current weather for a location",
            ActionKind::Summarize => "Summarize a piece of text",
            ActionKind::Answer => "Compose an answer from search results",
            ActionKind::NoOp => "Do nothing",
        }
    }

    /// Parameter shape advertised to the model.
    pub fn parameters_hint(self) -> Value {
        match self {
            ActionKind::Search => json!({ "query": "string", "num_results": "int" }),
            ActionKind::ExtractWeather => json!({ "location": "string" }),
            ActionKind::Summarize => json!({ "text": "string", "max_length": "int" }),
            ActionKind::Answer => json!({
                "question": "string",
                "search_results": "list",
                "current_date": "string"
            }),
            ActionKind::NoOp => json!({}),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action as requested by the model, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub name: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl ActionRequest {
    pub fn new(name: impl Into<String>, parameters: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// Text recorded in the history for this request.
    pub fn describe(&self) -> String {
        let params =
            serde_json::to_string(&self.parameters).unwrap_or_else(|_| "{}".to_string());
        format!("Action: {} with params: {}", self.name, params)
    }
}

/// A validated action with typed parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Search {
        query: String,
        num_results: usize,
    },
    ExtractWeather {
        location: String,
    },
    Summarize {
        text: String,
        max_length: usize,
    },
    Answer {
        question: String,
        search_results: Vec<SearchHit>,
        current_date: String,
    },
    NoOp,
}

#[derive(Deserialize)]
struct SearchParams {
    query: String,
    #[serde(default = "default_num_results")]
    num_results: usize,
}

#[derive(Deserialize)]
struct WeatherParams {
    location: String,
}

#[derive(Deserialize)]
struct SummarizeParams {
    text: String,
    #[serde(default = "default_summary_length")]
    max_length: usize,
}

#[derive(Deserialize)]
struct AnswerParams {
    question: String,
    #[serde(default)]
    search_results: Vec<SearchHit>,
    #[serde(default)]
    current_date: Option<String>,
}

fn default_num_results() -> usize {
    DEFAULT_SEARCH_RESULTS
}

fn default_summary_length() -> usize {
    DEFAULT_SUMMARY_LENGTH
}

impl Action {
    pub fn from_request(request: &ActionRequest) -> Result<Self, ToolError> {
        let kind = ActionKind::from_name(&request.name)
            .ok_or_else(|| ToolError::UnknownAction(request.name.clone()))?;

        let action = match kind {
            ActionKind::Search => {
                let params: SearchParams = parse_params(&request.name, &request.parameters)?;
                Action::Search {
                    query: params.query,
                    num_results: params.num_results,
                }
            }
            ActionKind::ExtractWeather => {
                let params: WeatherParams = parse_params(&request.name, &request.parameters)?;
                Action::ExtractWeather {
                    location: params.location,
                }
            }
            ActionKind::Summarize => {
                let params: SummarizeParams = parse_params(&request.name, &request.parameters)?;
                Action::Summarize {
                    text: params.text,
                    max_length: params.max_length,
                }
            }
            ActionKind::Answer => {
                let params: AnswerParams = parse_params(&request.name, &request.parameters)?;
                Action::Answer {
                    question: params.question,
                    search_results: params.search_results,
                    current_date: params
                        .current_date
                        .filter(|date| !date.trim().is_empty())
                        .unwrap_or_else(current_date),
                }
            }
            ActionKind::NoOp => Action::NoOp,
        };

        Ok(action)
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Search { .. } => ActionKind::Search,
            Action::ExtractWeather { .. } => ActionKind::ExtractWeather,
            Action::Summarize { .. } => ActionKind::Summarize,
            Action::Answer { .. } => ActionKind::Answer,
            Action::NoOp => ActionKind::NoOp,
        }
    }
}

/// Errors name the action as requested, alias included.
fn parse_params<T: DeserializeOwned>(
    requested: &str,
    parameters: &Map<String, Value>,
) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(parameters.clone())).map_err(|err| {
        ToolError::InvalidParameters {
            action: requested.to_string(),
            reason: err.to_string(),
        }
    })
}
