use super::models::AgentOptions;
use super::runner::Agent;
use crate::application::preprocess::KeywordPreprocessor;
use crate::application::tooling::{ModelSummarizer, Toolkit, WebToolkit};
use crate::config::AppConfig;
use crate::infrastructure::search::{SearchProvider, SerpApiClient};
use crate::model::{DynamicModelProvider, ModelProvider};
use std::sync::Arc;
use tracing::debug;

impl Agent<DynamicModelProvider> {
    /// Wire model backends, SerpAPI search and, when enabled, the keyword
    /// stage from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        let provider = Arc::new(DynamicModelProvider::from_configs(&config.providers));
        let search: Arc<dyn SearchProvider> =
            Arc::new(SerpApiClient::from_settings(&config.search));
        let toolkit: Arc<dyn Toolkit> = Arc::new(WebToolkit::new(search, config.search.clone()));

        let agent = Agent::new(
            Arc::clone(&provider),
            Arc::clone(&toolkit),
            AgentOptions::from_config(config),
        );

        if !config.agent.preprocess {
            debug!("Keyword stage disabled");
            return agent;
        }

        let mut stage = KeywordPreprocessor::new(toolkit);
        if config.summarization.model_backed {
            let summary_provider: Arc<dyn ModelProvider> = provider;
            stage = stage.with_summarizer(ModelSummarizer::new(
                summary_provider,
                config.default_provider.clone(),
                config.summarization_model(),
            ));
        }
        agent.with_preprocessor(Box::new(stage))
    }
}
