pub mod heurist;
pub mod mock;
pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use heurist::HeuristTrendProvider;
pub use mock::{MockCompletionProvider, MockTrendProvider};
pub use openai::OpenAiCompletionProvider;

/// Sentinel returned when the analytics API has no records for a niche.
pub const NO_TRENDS_SENTINEL: &str = "No trending topics found for this niche.";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait TrendProvider: Send + Sync {
    /// Fetch trending topic strings for a niche, in API order.
    async fn fetch_trending(&self, niche: &str) -> Result<Vec<String>, ProviderError>;
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate one content suggestion for a trend.
    async fn generate(&self, trend: &str) -> Result<String, ProviderError>;
}
