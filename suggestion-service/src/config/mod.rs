use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::config::{get_env, is_prod};
use service_core::error::AppError;

/// Default base URL for the completion API.
const DEFAULT_COMPLETION_API_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub heurist: HeuristConfig,
    pub openai: OpenAiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeuristConfig {
    /// Base URL of the trend analytics API.
    pub api_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: Secret<String>,
    pub api_base_url: String,
    /// Model used for content suggestions (e.g., gpt-4).
    pub model: String,
}

impl SuggestionConfig {
    /// Load configuration from the environment, once at startup.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = is_prod();

        Ok(SuggestionConfig {
            common,
            heurist: HeuristConfig {
                api_url: get_env("HEURIST_API_URL", None, is_prod)?,
            },
            openai: OpenAiConfig {
                api_key: Secret::new(get_env("OPENAI_API_KEY", None, is_prod)?),
                api_base_url: get_env(
                    "OPENAI_API_BASE_URL",
                    Some(DEFAULT_COMPLETION_API_BASE_URL),
                    is_prod,
                )?,
                model: get_env("SUGGESTION_MODEL", Some("gpt-4"), is_prod)?,
            },
        })
    }
}
