use std::env;

use careerbot_llm::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const DEFAULT_DATABASE_URL: &str = "s3://career-chatbot";

pub const DEFAULT_PORT: u16 = 5000;

/// Server settings, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Document store connection string (`s3://{bucket}` or `memory://`).
    pub database_url: String,
    pub port: u16,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| eyre::eyre!("invalid PORT {raw:?}: {e}"))?,
            None => DEFAULT_PORT,
        };

        let api_key = var("OPENROUTER_API_KEY")
            .ok_or_else(|| eyre::eyre!("OPENROUTER_API_KEY must be set"))?;

        Ok(Self {
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            port,
            llm: LlmConfig {
                api_key,
                model: var("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: var("OPENROUTER_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            },
        })
    }
}
