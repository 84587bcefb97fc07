use anyhow::{Context, Result};

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
/// One week.
const MAX_SESSION_TTL_MINUTES: i64 = 7 * 24 * 60;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on a single model round trip. There is no retry.
    pub llm_timeout_secs: u64,
    pub session_ttl_minutes: i64,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            session_ttl_minutes: check_session_ttl(parse_env("SESSION_TTL_MINUTES", 60)?)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn check_session_ttl(minutes: i64) -> Result<i64> {
    anyhow::ensure!(
        (1..=MAX_SESSION_TTL_MINUTES).contains(&minutes),
        "SESSION_TTL_MINUTES must be between 1 and {MAX_SESSION_TTL_MINUTES}, got {minutes}"
    );
    Ok(minutes)
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
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
impl Config {
    /// Configuration used by in-process router tests.
    pub fn for_tests() -> Self {
        Config {
            gemini_api_key: "test-key".to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            llm_timeout_secs: 5,
            session_ttl_minutes: 60,
            max_upload_bytes: 1024 * 1024,
        }
    }
}
