use super::answer::compose_answer;
use super::error::ToolInvokeError;
use super::outcome::{AnswerOutcome, NoOpOutcome, SearchOutcome, SummaryOutcome, WeatherOutcome};
use super::summarize::summarize_text;
use crate::config::SearchSettings;
use crate::infrastructure::search::{SearchHit, SearchProvider};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

const WEATHER_RESULTS: usize = 3;

/// Implementations of the five agent actions.
///
/// `summarize`, `answer` and `no_op` default to the local heuristics, so an
/// implementor only has to supply the networked actions.
#[async_trait]
pub trait Toolkit: Send + Sync {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<SearchOutcome, ToolInvokeError>;

    async fn extract_weather(&self, location: &str) -> Result<WeatherOutcome, ToolInvokeError>;

    async fn summarize(
        &self,
        text: &str,
        max_length: usize,
    ) -> Result<SummaryOutcome, ToolInvokeError> {
        Ok(summarize_text(text, max_length))
    }

    async fn answer(
        &self,
        question: &str,
        search_results: &[SearchHit],
        current_date: &str,
    ) -> Result<AnswerOutcome, ToolInvokeError> {
        Ok(compose_answer(question, search_results, current_date))
    }

    fn no_op(&self) -> NoOpOutcome {
        NoOpOutcome::new()
    }
}

/// Toolkit backed by a web [`SearchProvider`].
pub struct WebToolkit {
    search: Arc<dyn SearchProvider>,
    settings: SearchSettings,
}

impl WebToolkit {
    pub fn new(search: Arc<dyn SearchProvider>, settings: SearchSettings) -> Self {
        Self { search, settings }
    }
}

#[async_trait]
impl Toolkit for WebToolkit {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<SearchOutcome, ToolInvokeError> {
        let hits = self.search.search(query, num_results).await?;
        debug!(provider = self.search.id(), query, hits = hits.len(), "Search completed");
        Ok(SearchOutcome::new(query, hits))
    }

    async fn extract_weather(&self, location: &str) -> Result<WeatherOutcome, ToolInvokeError> {
        let query = self.settings.weather_query_for(location);
        match self.search(&query, WEATHER_RESULTS).await {
            Ok(outcome) => {
                let weather = WeatherOutcome::from_hits(location, query, &outcome.results);
                info!(location, reports = weather.weather_data.len(), "Weather lookup completed");
                Ok(weather)
            }
            Err(err) => {
                warn!(location, error = %err, "Weather search failed");
                Ok(WeatherOutcome::failed(
                    location,
                    format!("Failed to search weather data: {err}"),
                ))
            }
        }
    }
}
