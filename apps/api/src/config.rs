use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::prompts::RuntimeMode;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// `APP_ENV=production` disables prompt writes; `CUSTOM_PROMPT` becomes the only editing path.
    pub runtime_mode: RuntimeMode,
    pub prompts_dir: PathBuf,
    /// Raw `CUSTOM_PROMPT` value. Structured JSON or plain instruction text.
    pub custom_prompt: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            runtime_mode: RuntimeMode::from_env_value(
                &std::env::var("APP_ENV").unwrap_or_default(),
            ),
            prompts_dir: std::env::var("PROMPTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/prompts")),
            custom_prompt: optional_env("CUSTOM_PROMPT"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and empty values are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
