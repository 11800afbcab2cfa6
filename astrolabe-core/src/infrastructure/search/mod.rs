//! Web search backends used by the search and weather actions.

mod serpapi;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use serpapi::SerpApiClient;

/// One organic search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub position: u32,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search provider '{provider}' requires an API key")]
    MissingApiKey { provider: String },
    #[error("network error calling search provider '{provider}': {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("search provider '{provider}' returned {status}: {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn id(&self) -> &str;

    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchHit>, SearchError>;
}
