//! Completion API client.
//!
//! Sends one legacy completion request per trend with a fixed prompt
//! template and returns the trimmed text of the first choice.

use super::{CompletionProvider, ProviderError};
use crate::config::OpenAiConfig;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Token cap for one generated suggestion.
const MAX_TOKENS: u32 = 50;

/// Sampling temperature for suggestion generation.
const TEMPERATURE: f32 = 0.7;

pub struct OpenAiCompletionProvider {
    config: OpenAiConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

impl OpenAiCompletionProvider {
    /// The completion client carries no request timeout; only the trend
    /// lookup path is bounded.
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn prompt_for(trend: &str) -> String {
        format!(
            "Suggest a creative content idea related to '{}' for influencers.",
            trend
        )
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    async fn generate(&self, trend: &str) -> Result<String, ProviderError> {
        let request = CompletionRequest {
            model: &self.config.model,
            prompt: Self::prompt_for(trend),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let url = format!("{}/completions", self.config.api_base_url);

        tracing::debug!(model = %self.config.model, trend = %trend, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ProviderError::Connection(format!("Error generating content idea: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!(
                "Completion API returned status {}: {}",
                status, body
            )));
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            ProviderError::MalformedResponse(format!("Failed to parse completion response: {}", e))
        })?;

        completion
            .choices
            .first()
            .map(|choice| choice.text.trim().to_string())
            .ok_or_else(|| {
                ProviderError::MalformedResponse(
                    "Completion response contained no choices".to_string(),
                )
            })
    }
}
