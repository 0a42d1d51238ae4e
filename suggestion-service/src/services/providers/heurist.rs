//! Heurist analytics client.
//!
//! Fetches trending topic records for a niche via a parameterized
//! query-style GET request.

use super::{ProviderError, TrendProvider, NO_TRENDS_SENTINEL};
use crate::config::HeuristConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Timeout applied to every trend lookup request.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Query template sent to the analytics API.
const TREND_QUERY: &str = "SELECT * FROM content_ideas WHERE niche = :niche";

pub struct HeuristTrendProvider {
    config: HeuristConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct TrendLookupResponse {
    #[serde(default)]
    records: Vec<TrendRecord>,
}

#[derive(Debug, Deserialize)]
struct TrendRecord {
    #[serde(rename = "Suggested Content Idea")]
    suggested_content_idea: String,
}

impl HeuristTrendProvider {
    pub fn new(config: HeuristConfig) -> Self {
        let client = Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl TrendProvider for HeuristTrendProvider {
    async fn fetch_trending(&self, niche: &str) -> Result<Vec<String>, ProviderError> {
        let params = serde_json::json!({ "niche": niche }).to_string();

        tracing::debug!(niche = %niche, "Fetching trending ideas");

        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[("query", TREND_QUERY), ("params", params.as_str())])
            .send()
            .await
            .map_err(|e| {
                ProviderError::Connection(format!("Error fetching trending ideas: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!(
                "Trend lookup returned status {}: {}",
                status, body
            )));
        }

        let lookup: TrendLookupResponse = response.json().await.map_err(|e| {
            ProviderError::MalformedResponse(format!(
                "Failed to parse trend lookup response: {}",
                e
            ))
        })?;

        if lookup.records.is_empty() {
            return Ok(vec![NO_TRENDS_SENTINEL.to_string()]);
        }

        Ok(lookup
            .records
            .into_iter()
            .map(|record| record.suggested_content_idea)
            .collect())
    }
}
