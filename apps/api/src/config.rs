use std::fmt;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::models::{lookup_model, ModelSpec};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_SCORING_MODEL: &str = "gpt-4o";
const DEFAULT_JUDGE_MODEL: &str = "o3-mini";
const DEFAULT_CHROMA_HOST: &str = "api.trychroma.com";

/// Server configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub chroma: ChromaConfig,
    pub port: u16,
    pub log_level: String,
}

/// Model-provider settings. The offline CLIs load only this part.
#[derive(Clone)]
pub struct LlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub scoring_model: ModelSpec,
    pub judge_model: ModelSpec,
    pub timeout: Duration,
    pub max_retries: u32,
}

/// Connection settings for the hosted Chroma vector database.
#[derive(Clone)]
pub struct ChromaConfig {
    pub host: String,
    pub tenant: String,
    pub database: String,
    pub token: String,
    pub ssl: bool,
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            llm: LlmConfig::from_lookup(&lookup)?,
            chroma: ChromaConfig::from_lookup(&lookup)?,
            port: or_default(&lookup, "PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            log_level: or_default(&lookup, "LOG_LEVEL", "info"),
        })
    }
}

impl LlmConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_retries = or_default(lookup, "LLM_MAX_RETRIES", "3")
            .parse::<u32>()
            .context("LLM_MAX_RETRIES must be a non-negative integer")?;
        if max_retries == 0 {
            bail!("LLM_MAX_RETRIES must be at least 1");
        }

        Ok(LlmConfig {
            openai_api_key: require(lookup, "OPENAI_API_KEY")?,
            openai_base_url: or_default(lookup, "OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            scoring_model: parse_model(&or_default(lookup, "SCORING_MODEL", DEFAULT_SCORING_MODEL))
                .context("SCORING_MODEL is invalid")?,
            judge_model: parse_model(&or_default(lookup, "JUDGE_MODEL", DEFAULT_JUDGE_MODEL))
                .context("JUDGE_MODEL is invalid")?,
            timeout: Duration::from_secs(
                or_default(lookup, "LLM_TIMEOUT_SECS", "120")
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a number of seconds")?,
            ),
            max_retries,
        })
    }
}

impl ChromaConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(ChromaConfig {
            host: or_default(lookup, "CHROMA_HOST", DEFAULT_CHROMA_HOST),
            tenant: require(lookup, "CHROMA_TENANT")?,
            database: require(lookup, "CHROMA_DATABASE")?,
            token: require(lookup, "CHROMA_TOKEN")?,
            ssl: parse_bool(&or_default(lookup, "CHROMA_SSL", "true"))
                .context("CHROMA_SSL must be true or false")?,
        })
    }
}

fn parse_model(name: &str) -> Result<ModelSpec> {
    match lookup_model(name) {
        Some(spec) => Ok(spec),
        None => bail!("unknown model '{name}'"),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("'{other}' is not a boolean"),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("llm", &self.llm)
            .field("chroma", &self.chroma)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("openai_api_key", &"[redacted]")
            .field("openai_base_url", &self.openai_base_url)
            .field("scoring_model", &self.scoring_model.name)
            .field("judge_model", &self.judge_model.name)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl fmt::Debug for ChromaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChromaConfig")
            .field("host", &self.host)
            .field("tenant", &self.tenant)
            .field("database", &self.database)
            .field("token", &"[redacted]")
            .field("ssl", &self.ssl)
            .finish()
    }
}
