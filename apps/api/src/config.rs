use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";
const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_CREDENTIAL_FILE: &str = ".hr-insights/credentials.json";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
///
/// Every secret here is server-side only and never leaves the process.
#[derive(Debug, Clone)]
pub struct Config {
    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub airtable_api_url: String,
    /// Server-held completion key used by the `ai-service` proxy. Optional:
    /// without it the proxy answers with canned text.
    pub openai_api_key: Option<String>,
    pub openai_api_url: String,
    pub openai_model: String,
    pub credential_file: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            airtable_api_key: require_env("AIRTABLE_API_KEY")?,
            airtable_base_id: require_env("AIRTABLE_BASE_ID")?,
            airtable_api_url: env_or("AIRTABLE_API_URL", DEFAULT_AIRTABLE_API_URL),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_api_url: env_or("OPENAI_API_URL", DEFAULT_OPENAI_API_URL),
            openai_model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            credential_file: PathBuf::from(env_or("CREDENTIAL_FILE", DEFAULT_CREDENTIAL_FILE)),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Blank values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
impl Config {
    /// Configuration pointing at unroutable endpoints, for handler tests.
    pub fn for_tests(credential_file: PathBuf) -> Self {
        Config {
            airtable_api_key: "test-airtable-key".to_string(),
            airtable_base_id: "appTEST".to_string(),
            airtable_api_url: "http://127.0.0.1:9/v0".to_string(),
            openai_api_key: None,
            openai_api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            credential_file,
            port: 0,
            rust_log: "info".to_string(),
        }
    }
}
