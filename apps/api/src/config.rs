use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a default; `DATABASE_URL` and `GEMINI_API_KEY` are optional.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres when set; otherwise the library lives in memory.
    pub database_url: Option<String>,
    /// Fallback key when a request carries no `x-gemini-api-key` header.
    pub gemini_api_key: Option<String>,
    /// Name for a fresh coach profile; the stored profile wins afterwards.
    pub coach_name: String,
    pub resource_fetch_max_chars: usize,
    pub http_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            coach_name: optional_env("COACH_NAME").unwrap_or_else(|| "Coach".to_string()),
            resource_fetch_max_chars: parse_env("RESOURCE_FETCH_MAX_CHARS", 3000)?,
            http_timeout_secs: parse_env("HTTP_TIMEOUT_SECS", 60)?,
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}
