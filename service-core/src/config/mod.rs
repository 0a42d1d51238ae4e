use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Whether the process runs with ENVIRONMENT=prod.
pub fn is_prod() -> bool {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod"
}

/// Read an environment variable, falling back to a development default.
///
/// Every variable is required in production; without a default it is
/// required everywhere.
pub fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_env_prefers_the_environment() {
        env::set_var("SERVICE_CORE_TEST_VAR", "from-env");
        let value = get_env("SERVICE_CORE_TEST_VAR", Some("default"), false).unwrap();
        env::remove_var("SERVICE_CORE_TEST_VAR");
        assert_eq!(value, "from-env");
    }

    #[test]
    fn get_env_falls_back_to_default_in_dev() {
        let value = get_env("SERVICE_CORE_MISSING_VAR", Some("default"), false).unwrap();
        assert_eq!(value, "default");
    }

    #[test]
    fn get_env_requires_value_in_prod() {
        assert!(get_env("SERVICE_CORE_MISSING_VAR", Some("default"), true).is_err());
    }

    #[test]
    fn get_env_requires_value_without_default() {
        assert!(get_env("SERVICE_CORE_MISSING_VAR", None, false).is_err());
    }
}
