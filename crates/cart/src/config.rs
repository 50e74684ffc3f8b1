//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_API_URL` - Inventory API base URL (default: `http://localhost:3333`)
//! - `CART_API_TIMEOUT_SECS` - HTTP timeout for inventory requests (default: 10)
//! - `CART_STORAGE_PATH` - File holding the persisted cart snapshot
//!   (default: `.rocket-shoes/storage.json`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_TIMEOUT_SECS: &str = "10";
const DEFAULT_STORAGE_PATH: &str = ".rocket-shoes/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart front-end configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Inventory API configuration
    pub api: InventoryApiConfig,
    /// Where the cart snapshot is persisted
    pub storage_path: PathBuf,
}

/// Inventory API client configuration.
#[derive(Debug, Clone)]
pub struct InventoryApiConfig {
    /// Base URL; `stock/{id}` and `products/{id}` are resolved against it
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

impl InventoryApiConfig {
    /// Configuration for a base URL with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL is not an http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_api_url("CART_API_URL", base_url)?,
            timeout: parse_timeout("CART_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        })
    }

    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_api_url(
                "CART_API_URL",
                &get_env_or_default("CART_API_URL", DEFAULT_API_URL),
            )?,
            timeout: parse_timeout(
                "CART_API_TIMEOUT_SECS",
                &get_env_or_default("CART_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            )?,
        })
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api = InventoryApiConfig::from_env()?;
        let storage_path =
            PathBuf::from(get_env_or_default("CART_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        if storage_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingEnvVar("CART_STORAGE_PATH".to_string()));
        }

        Ok(Self { api, storage_path })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and validate the inventory API base URL.
///
/// A trailing slash is enforced so relative joins keep the base path.
fn parse_api_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Parse a timeout given in whole seconds. Zero is rejected.
fn parse_timeout(var_name: &str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must be greater than zero".to_string(),
        )),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            e.to_string(),
        )),
    }
}
