use std::path::PathBuf;

use anyhow::{Context, Result};

/// Default per-request timeout. The backend's slowest endpoints (resume and
/// voice analysis uploads) are expected to answer within this window.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin, e.g. `https://api.example.com`. `/api` is appended
    /// per request by the API client.
    pub api_base_url: String,
    /// Where the session snapshot is persisted across restarts.
    pub session_file: PathBuf,
    pub request_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: require_env("API_BASE_URL")?,
            session_file: match std::env::var("SESSION_FILE") {
                Ok(path) => PathBuf::from(path),
                Err(_) => default_session_file()?,
            },
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn default_session_file() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Could not determine a platform data directory")?;
    Ok(base.join("recruit-client").join("session.json"))
}

#[cfg(test)]
pub(crate) fn fixture(session_file: PathBuf) -> Config {
    Config {
        api_base_url: "http://localhost:8000".to_string(),
        session_file,
        request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        rust_log: "info".to_string(),
    }
}
