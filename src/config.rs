use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Runtime configuration, built once at startup and passed down explicitly
/// so tests can construct their own instead of relying on process state.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        dotenv().ok(); // Load .env file if present
        Ok(Config {
            anthropic_api_key: get_env("ANTHROPIC_API_KEY")?,
            anthropic_base_url: get_env_or_default(
                "ANTHROPIC_BASE_URL",
                "https://api.anthropic.com",
            ),
            model: get_env_or_default("CARESCOUT_MODEL", "claude-sonnet-4-20250514"),
            max_tokens: get_env_or_default("CARESCOUT_MAX_TOKENS", "4096")
                .parse()
                .context("CARESCOUT_MAX_TOKENS must be a positive integer")?,
            bind_addr: get_env_or_default("CARESCOUT_BIND_ADDR", "0.0.0.0:3000"),
        })
    }
}

fn get_env(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("Missing required environment variable: {key}"))
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
