//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `KIOGLOSS_API_URL` - Backend base URL (default: `http://localhost:8080`)
//! - `KIOGLOSS_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//! - `KIOGLOSS_STORAGE_DIR` - Directory for durable client state
//!   (default: `.kiogloss`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STORAGE_DIR: &str = ".kiogloss";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend REST API.
    pub api_base_url: Url,
    /// Upper bound on any single request, timeouts surface as network errors.
    pub request_timeout: Duration,
    /// Directory holding the durable credential and cart snapshots.
    pub storage_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. Every
    /// variable has a default, so a bare environment is valid.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("KIOGLOSS_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("KIOGLOSS_API_URL".to_owned(), e.to_string()))?;

        let timeout_secs = get_env_or_default(
            "KIOGLOSS_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("KIOGLOSS_TIMEOUT_SECS".to_owned(), e.to_string())
        })?;

        let storage_dir =
            PathBuf::from(get_env_or_default("KIOGLOSS_STORAGE_DIR", DEFAULT_STORAGE_DIR));

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            storage_dir,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // The default URL is a compile-time constant and always parses.
            api_base_url: Url::parse(DEFAULT_API_URL).unwrap_or_else(|_| unreachable!()),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.storage_dir, PathBuf::from(".kiogloss"));
    }

    #[test]
    fn test_env_default_helper() {
        assert_eq!(
            get_env_or_default("KIOGLOSS_TEST_UNSET_VAR", "fallback"),
            "fallback"
        );
    }
}
