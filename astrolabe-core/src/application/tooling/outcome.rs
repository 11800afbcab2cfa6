use super::action::ActionKind;
use super::truncate_chars;
use crate::infrastructure::search::SearchHit;
use chrono::{DateTime, Local};
use serde::Serialize;

/// Characters of the source text kept in a summary record.
const ORIGINAL_TEXT_PREVIEW: usize = 200;

/// Snippet fragments that mark a result as weather data.
const WEATHER_KEYWORDS: [&str; 8] = [
    "°c",
    "°f",
    "nhiệt độ",
    "thời tiết",
    "độ c",
    "temperature",
    "weather",
    "humidity",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub success: bool,
    pub query: String,
    pub results: Vec<SearchHit>,
    pub total_results: usize,
    pub timestamp: DateTime<Local>,
}

impl SearchOutcome {
    pub fn new(query: impl Into<String>, results: Vec<SearchHit>) -> Self {
        Self {
            success: true,
            query: query.into(),
            total_results: results.len(),
            results,
            timestamp: Local::now(),
        }
    }

    /// Snippets of all hits, space separated.
    pub fn snippet_text(&self) -> String {
        self.results
            .iter()
            .map(|hit| hit.snippet.trim())
            .filter(|snippet| !snippet.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherReport {
    pub source: String,
    pub information: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherOutcome {
    pub success: bool,
    pub location: String,
    pub weather_data: Vec<WeatherReport>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search_query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl WeatherOutcome {
    /// Keep the hits whose snippet mentions temperature or weather.
    pub fn from_hits(
        location: impl Into<String>,
        search_query: impl Into<String>,
        hits: &[SearchHit],
    ) -> Self {
        let weather_data = hits
            .iter()
            .filter(|hit| {
                let snippet = hit.snippet.to_lowercase();
                WEATHER_KEYWORDS
                    .iter()
                    .any(|keyword| snippet.contains(keyword))
            })
            .map(|hit| WeatherReport {
                source: hit.title.clone(),
                information: hit.snippet.clone(),
                link: hit.link.clone(),
            })
            .collect();

        Self {
            success: true,
            location: location.into(),
            weather_data,
            search_query: search_query.into(),
            error: None,
            timestamp: Local::now(),
        }
    }

    pub fn failed(location: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            location: location.into(),
            weather_data: Vec::new(),
            search_query: String::new(),
            error: Some(error.into()),
            timestamp: Local::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryOutcome {
    pub success: bool,
    pub summary: String,
    pub original_text: String,
    pub original_length: usize,
    pub summary_length: usize,
    pub compression_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl SummaryOutcome {
    pub fn new(original_text: impl Into<String>, summary: impl Into<String>) -> Self {
        let original_text = original_text.into();
        let summary = summary.into();
        let original_length = original_text.chars().count();
        let summary_length = summary.chars().count();
        let compression_ratio = if original_length == 0 {
            0.0
        } else {
            ((summary_length as f64 / original_length as f64) * 100.0).round() / 100.0
        };

        let original_text = if original_length > ORIGINAL_TEXT_PREVIEW {
            format!("{}...", truncate_chars(&original_text, ORIGINAL_TEXT_PREVIEW))
        } else {
            original_text
        };

        Self {
            success: true,
            summary,
            original_text,
            original_length,
            summary_length,
            compression_ratio,
            model_used: None,
            error: None,
            timestamp: Local::now(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            summary: String::new(),
            original_text: String::new(),
            original_length: 0,
            summary_length: 0,
            compression_ratio: 0.0,
            model_used: None,
            error: Some(error.into()),
            timestamp: Local::now(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model_used = Some(model.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerSource {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOutcome {
    pub success: bool,
    pub question: String,
    pub answer: String,
    pub sources: Vec<AnswerSource>,
    pub total_sources: usize,
    pub current_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl AnswerOutcome {
    pub fn failed(question: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            question: question.into(),
            answer: String::new(),
            sources: Vec::new(),
            total_sources: 0,
            current_date: String::new(),
            error: Some(error.into()),
            timestamp: Local::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoOpOutcome {
    pub success: bool,
    pub action: String,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl NoOpOutcome {
    pub fn new() -> Self {
        Self {
            success: true,
            action: ActionKind::NoOp.as_str().to_string(),
            message: "No action performed".to_string(),
            timestamp: Local::now(),
        }
    }
}

impl Default for NoOpOutcome {
    fn default() -> Self {
        Self::new()
    }
}

/// Record produced by any action. Serializes as the inner record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionOutput {
    Search(SearchOutcome),
    Weather(WeatherOutcome),
    Summary(SummaryOutcome),
    Answer(AnswerOutcome),
    NoOp(NoOpOutcome),
}

impl ActionOutput {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionOutput::Search(_) => ActionKind::Search,
            ActionOutput::Weather(_) => ActionKind::ExtractWeather,
            ActionOutput::Summary(_) => ActionKind::Summarize,
            ActionOutput::Answer(_) => ActionKind::Answer,
            ActionOutput::NoOp(_) => ActionKind::NoOp,
        }
    }

    pub fn success(&self) -> bool {
        match self {
            ActionOutput::Search(outcome) => outcome.success,
            ActionOutput::Weather(outcome) => outcome.success,
            ActionOutput::Summary(outcome) => outcome.success,
            ActionOutput::Answer(outcome) => outcome.success,
            ActionOutput::NoOp(outcome) => outcome.success,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ActionOutput::Search(_) => None,
            ActionOutput::Weather(outcome) => outcome.error.as_deref(),
            ActionOutput::Summary(outcome) => outcome.error.as_deref(),
            ActionOutput::Answer(outcome) => outcome.error.as_deref(),
            ActionOutput::NoOp(_) => None,
        }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        match self {
            ActionOutput::Search(outcome) => outcome.timestamp,
            ActionOutput::Weather(outcome) => outcome.timestamp,
            ActionOutput::Summary(outcome) => outcome.timestamp,
            ActionOutput::Answer(outcome) => outcome.timestamp,
            ActionOutput::NoOp(outcome) => outcome.timestamp,
        }
    }
}
