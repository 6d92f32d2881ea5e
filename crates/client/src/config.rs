//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LEADSCOUT_API_BASE` - Backend origin (default: `http://127.0.0.1:8000`)
//! - `LEADSCOUT_SESSION_FILE` - Session file path (default: per-origin file
//!   under the user config directory)
//! - `LEADSCOUT_TIMEOUT_SECS` - HTTP request timeout (default: 30)
//! - `LEADSCOUT_REFRESH_SECS` - Dashboard refresh period (default: 30)
//! - `LEADSCOUT_LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const API_BASE_VAR: &str = "LEADSCOUT_API_BASE";
const SESSION_FILE_VAR: &str = "LEADSCOUT_SESSION_FILE";
const TIMEOUT_VAR: &str = "LEADSCOUT_TIMEOUT_SECS";
const REFRESH_VAR: &str = "LEADSCOUT_REFRESH_SECS";
const LOG_FORMAT_VAR: &str = "LEADSCOUT_LOG_FORMAT";

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REFRESH_SECS: u64 = 30;
const APP_DIR: &str = "leadscout";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid API base URL {0}: {1}")]
    InvalidApiBase(String, String),
    #[error("Could not determine the user config directory; set LEADSCOUT_SESSION_FILE")]
    NoConfigDir,
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin; API paths are resolved against it
    pub api_base: Url,
    /// File backing the session store for this origin
    pub session_file: PathBuf,
    /// Per-request timeout for the HTTP client
    pub request_timeout: Duration,
    /// Period of the dashboard auto-refresh
    pub refresh_interval: Duration,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the origin and session file.
    #[must_use]
    pub const fn new(api_base: Url, session_file: PathBuf) -> Self {
        Self {
            api_base,
            session_file,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or no session file
    /// location can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_api_base(None)
    }

    /// Load configuration, letting `api_base` (e.g. a CLI flag) take
    /// precedence over `LEADSCOUT_API_BASE`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or no session file
    /// location can be determined.
    pub fn from_env_with_api_base(api_base: Option<&str>) -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let raw_base = api_base.map_or_else(
            || get_env_or_default(API_BASE_VAR, DEFAULT_API_BASE),
            ToOwned::to_owned,
        );
        let api_base = parse_api_base(&raw_base)?;

        let session_file = match get_optional_env(SESSION_FILE_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_session_file(&api_base)?,
        };

        let request_timeout = Duration::from_secs(get_secs(TIMEOUT_VAR, DEFAULT_TIMEOUT_SECS)?);
        let refresh_interval = Duration::from_secs(get_secs(REFRESH_VAR, DEFAULT_REFRESH_SECS)?);

        let log_format = match get_env_or_default(LOG_FORMAT_VAR, "text")
            .to_ascii_lowercase()
            .as_str()
        {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    LOG_FORMAT_VAR.to_string(),
                    format!("expected text or json, got {other}"),
                ));
            }
        };

        Ok(Self {
            api_base,
            session_file,
            request_timeout,
            refresh_interval,
            log_format,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

/// Parse and check a backend origin.
///
/// # Errors
///
/// Returns `ConfigError::InvalidApiBase` unless the URL is a bare
/// `http`/`https` origin: a host, and no path, query or fragment.
pub fn parse_api_base(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidApiBase(raw.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidApiBase(
            raw.to_string(),
            format!("unsupported scheme {}", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidApiBase(
            raw.to_string(),
            "missing host".to_string(),
        ));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidApiBase(
            raw.to_string(),
            "expected an origin without a path".to_string(),
        ));
    }
    Ok(url)
}

/// Filesystem-safe name for an origin, e.g. `http_127.0.0.1_8000`.
#[must_use]
pub fn origin_key(url: &Url) -> String {
    let host = url.host_str().unwrap_or("unknown");
    let port = url.port_or_known_default().unwrap_or(0);
    format!("{}_{host}_{port}", url.scheme())
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `<config_dir>/leadscout/sessions/<origin>.json`
fn default_session_file(api_base: &Url) -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(config_dir
        .join(APP_DIR)
        .join("sessions")
        .join(format!("{}.json", origin_key(api_base))))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get a positive number of seconds.
fn get_secs(key: &str, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(secs)
}
