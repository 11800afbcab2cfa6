use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::{SearchError, SearchHit, SearchProvider};
use crate::config::{SearchSettings, resolve_api_key};

const PROVIDER_ID: &str = "serpapi";

/// Google search through SerpAPI's `search.json` endpoint.
#[derive(Clone)]
pub struct SerpApiClient {
    endpoint: String,
    api_key: Option<String>,
    language: String,
    country: String,
    http: Client,
}

impl SerpApiClient {
    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            api_key: resolve_api_key(PROVIDER_ID, settings.api_key.as_deref()),
            language: settings.language.clone(),
            country: settings.country.clone(),
            http: Client::new(),
        }
    }

    fn url(&self) -> String {
        format!("{}/search.json", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    fn id(&self) -> &str {
        PROVIDER_ID
    }

    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SearchError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            })?;

        info!(query, num_results, "Querying SerpAPI");
        let num = num_results.to_string();
        let response = self
            .http
            .get(self.url())
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("num", num.as_str()),
                ("hl", self.language.as_str()),
                ("gl", self.country.as_str()),
                ("api_key", api_key),
            ])
            .send()
            .await
            .map_err(|source| SearchError::Network {
                provider: PROVIDER_ID.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let payload: SerpApiResponse =
            response.json().await.map_err(|source| SearchError::Network {
                provider: PROVIDER_ID.to_string(),
                source,
            })?;
        debug!(hits = payload.organic_results.len(), "SerpAPI responded");

        Ok(payload.organic_results)
    }
}

#[derive(Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<SearchHit>,
}
