use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
/// Matches the "PDF files only, max 10MB" limit advertised by the upload form.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Client configuration loaded from environment variables.
/// Every variable is optional; CLI flags override what is found here.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub max_upload_bytes: u64,
    /// `None` means requests may hang until the server answers.
    pub request_timeout: Option<Duration>,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            request_timeout: None,
            rust_log: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<u64>()
                    .context("MAX_UPLOAD_BYTES must be a non-negative integer")?,
                None => defaults.max_upload_bytes,
            },
            request_timeout: match optional_env("REQUEST_TIMEOUT_SECS") {
                Some(raw) => Some(Duration::from_secs(
                    raw.parse::<u64>()
                        .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
                )),
                None => None,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
