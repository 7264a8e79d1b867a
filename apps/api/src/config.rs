use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::generation::generator::GenerationSettings;
use crate::llm_client::{self, CompletionOptions, ResponseFormat};

/// Application configuration loaded from environment variables.
/// The provider credential is deliberately absent: it arrives with each request.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_max_tokens: u32,
    pub llm_temperature: f32,
    pub llm_timeout_secs: u64,
    /// Ask the provider for JSON mode. Disable for endpoints that reject it.
    pub llm_json_mode: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_api_url: std::env::var("LLM_API_URL")
                .unwrap_or_else(|_| llm_client::DEFAULT_API_URL.to_string()),
            llm_model: std::env::var("LLM_MODEL")
                .unwrap_or_else(|_| llm_client::DEFAULT_MODEL.to_string()),
            llm_max_tokens: parse_env("LLM_MAX_TOKENS", 4000)?,
            llm_temperature: parse_env("LLM_TEMPERATURE", 0.7)?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 60)?,
            llm_json_mode: parse_env("LLM_JSON_MODE", true)?,
        };
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm_temperature) {
            bail!(
                "LLM_TEMPERATURE must be between 0 and 2 (got {})",
                self.llm_temperature
            );
        }
        if self.llm_max_tokens == 0 {
            bail!("LLM_MAX_TOKENS must be greater than 0");
        }
        if self.llm_timeout_secs == 0 {
            bail!("LLM_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            options: CompletionOptions {
                max_tokens: self.llm_max_tokens,
                temperature: self.llm_temperature,
                response_format: if self.llm_json_mode {
                    ResponseFormat::JsonObject
                } else {
                    ResponseFormat::Text
                },
            },
            timeout: Duration::from_secs(self.llm_timeout_secs),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
