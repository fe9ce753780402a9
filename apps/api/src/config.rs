use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
/// Matches the 10 MB JSON limit the web client was built against.
const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
///
/// The generation credential is optional here: a missing key is reported
/// when the first generation request is made, not at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub llm_timeout_secs: u64,
    pub body_limit_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            body_limit_bytes: parse_env("BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)
                .context("BODY_LIMIT_BYTES must be a whole number of bytes")?,
            port: parse_env("PORT", DEFAULT_PORT).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Treats an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        None => Ok(default),
    }
}
