use super::Preprocessor;
use crate::application::agent::IntermediateResults;
use crate::application::tooling::{
    ActionOutput, ModelSummarizer, SearchOutcome, ToolInvokeError, Toolkit,
};
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::debug;

const SUMMARY_KEYWORDS: [&str; 4] = ["tóm tắt", "tổng hợp", "summary", "summarize"];
const WEATHER_KEYWORDS: [&str; 4] = ["thời tiết", "weather", "nhiệt độ", "temperature"];
const SEARCH_KEYWORDS: [&str; 3] = ["tìm kiếm", "search", "tìm hiểu"];

const SUMMARY_MAX_LENGTH: usize = 200;
const SEARCH_RESULTS: usize = 15;

static LOCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"thời tiết (?:ở |tại |của )?([^?,.]+)",
        r"weather (?:in |at |of )?([^?,.]+)",
        r"nhiệt độ (?:ở |tại |của )?([^?,.]+)",
        r"temperature (?:in |at |of )?([^?,.]+)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("location pattern is valid"))
    .collect()
});

/// Keyword-triggered shortcuts: summarise the latest search, look up the
/// weather for a named location, or run a wider search.
pub struct KeywordPreprocessor {
    toolkit: Arc<dyn Toolkit>,
    summarizer: Option<ModelSummarizer>,
}

impl KeywordPreprocessor {
    pub fn new(toolkit: Arc<dyn Toolkit>) -> Self {
        Self {
            toolkit,
            summarizer: None,
        }
    }

    pub fn with_summarizer(mut self, summarizer: ModelSummarizer) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    async fn summarize_latest_search(
        &self,
        intermediate: &IntermediateResults,
    ) -> Result<Option<ActionOutput>, ToolInvokeError> {
        let Some(search) = latest_search(intermediate) else {
            return Ok(None);
        };
        let text = search.snippet_text();
        if text.is_empty() {
            return Ok(None);
        }

        let summary = match &self.summarizer {
            Some(summarizer) => summarizer.summarize(&text, SUMMARY_MAX_LENGTH).await,
            None => self.toolkit.summarize(&text, SUMMARY_MAX_LENGTH).await?,
        };
        Ok(Some(ActionOutput::Summary(summary)))
    }
}

#[async_trait]
impl Preprocessor for KeywordPreprocessor {
    async fn process(
        &self,
        user_input: &str,
        intermediate: &IntermediateResults,
    ) -> Result<Option<ActionOutput>, ToolInvokeError> {
        let lowered = user_input.to_lowercase();

        if contains_any(&lowered, &SUMMARY_KEYWORDS)
            && let Some(output) = self.summarize_latest_search(intermediate).await?
        {
            debug!("Keyword stage produced a summary");
            return Ok(Some(output));
        }

        if contains_any(&lowered, &WEATHER_KEYWORDS)
            && let Some(location) = extract_location(&lowered)
        {
            debug!(location = %location, "Keyword stage looking up weather");
            let weather = self.toolkit.extract_weather(&location).await?;
            return Ok(Some(ActionOutput::Weather(weather)));
        }

        if contains_any(&lowered, &SEARCH_KEYWORDS) {
            debug!("Keyword stage running a wider search");
            let search = self.toolkit.search(user_input, SEARCH_RESULTS).await?;
            return Ok(Some(ActionOutput::Search(search)));
        }

        Ok(None)
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Location named after a weather keyword in lowercased input.
pub(crate) fn extract_location(lowered: &str) -> Option<String> {
    LOCATION_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(lowered)
            .and_then(|captures| captures.get(1))
            .map(|location| location.as_str().trim().to_string())
            .filter(|location| !location.is_empty())
    })
}

fn latest_search(intermediate: &IntermediateResults) -> Option<&SearchOutcome> {
    intermediate
        .values()
        .filter_map(|output| match output {
            ActionOutput::Search(search) if search.success => Some(search),
            _ => None,
        })
        .max_by_key(|search| search.timestamp)
}
