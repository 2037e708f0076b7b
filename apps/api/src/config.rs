use anyhow::{Context, Result};
use std::str::FromStr;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Pause between generation stages.
    pub stage_delay_ms: u64,
    pub llm_requests_per_minute: u32,
    pub llm_burst: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            stage_delay_ms: parse_env("STAGE_DELAY_MS", 3000)?,
            llm_requests_per_minute: parse_env("LLM_REQUESTS_PER_MINUTE", 15)?,
            llm_burst: parse_env("LLM_BURST", 4)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_defaults_and_rejects_garbage() {
        std::env::remove_var("TAILOR_TEST_UNSET");
        assert_eq!(parse_env::<u64>("TAILOR_TEST_UNSET", 3000).unwrap(), 3000);

        std::env::set_var("TAILOR_TEST_BAD_PORT", "eighty");
        assert!(parse_env::<u16>("TAILOR_TEST_BAD_PORT", 8080).is_err());

        std::env::set_var("TAILOR_TEST_RPM", "30");
        assert_eq!(parse_env::<u32>("TAILOR_TEST_RPM", 15).unwrap(), 30);
    }
}
