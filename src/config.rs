use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_APP_NAME: &str = "QA Bot Admin";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be an http(s) URL, got '{value}'")]
    InvalidUrl { name: &'static str, value: String },
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Connection settings for the remote bot API.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub bind_addr: String,
    pub app_name: String,
    pub logs_page_size: u32,
    /// Raw `SESSION_KEY`; `None` when unset or too short to use.
    pub session_key: Option<String>,
}

impl AppConfig {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = non_empty("QABOT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl { name: "QABOT_API_URL", value: base_url });
        }

        let timeout_secs = match non_empty("QABOT_API_TIMEOUT_SECS") {
            Some(raw) => parse_positive("QABOT_API_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let logs_page_size = match non_empty("LOGS_PAGE_SIZE") {
            Some(raw) => parse_positive("LOGS_PAGE_SIZE", &raw)?.min(100) as u32,
            None => DEFAULT_PAGE_SIZE,
        };

        let session_key = match non_empty("SESSION_KEY") {
            Some(key) if key.len() >= 64 => Some(key),
            Some(key) => {
                log::warn!("SESSION_KEY too short ({} bytes, need 64+), ignoring it", key.len());
                None
            }
            None => None,
        };

        Ok(Self {
            api: ApiSettings {
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout: Duration::from_secs(timeout_secs),
            },
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            app_name: non_empty("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            logs_page_size,
            session_key,
        })
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber { name, value: raw.to_string() }),
    }
}
