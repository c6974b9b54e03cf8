//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATA_DIR` - Directory holding the persisted cart and wishlist
//!   (default: .misterdesign)
//! - `STOREFRONT_STATIC_DIR` - Directory served under `/static`
//!   (default: crates/storefront/static)
//! - `CATALOG_BASE_URL` - Product API base URL (default: <https://fakestoreapi.com>)
//! - `CATALOG_CACHE_TTL_SECS` - Product cache lifetime (default: 300)
//! - `CATALOG_TIMEOUT_SECS` - Product API request timeout (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_BASE_URL: &str = "https://fakestoreapi.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the persisted collections
    pub data_dir: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Product API configuration
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., "development")
    pub sentry_environment: Option<String>,
}

/// Product API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; `/products` is resolved against it
    pub base_url: Url,
    /// How long fetched products stay cached
    pub cache_ttl: Duration,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_url(),
            cache_ttl: Duration::from_secs(300),
            timeout: Duration::from_secs(10),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let data_dir = PathBuf::from(get_env_or_default("STOREFRONT_DATA_DIR", ".misterdesign"));
        let static_dir = PathBuf::from(get_env_or_default(
            "STOREFRONT_STATIC_DIR",
            "crates/storefront/static",
        ));
        let catalog = CatalogConfig::from_env()?;

        Ok(Self {
            host,
            port,
            data_dir,
            static_dir,
            catalog,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Path of the JSON document holding the persisted collections.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }
}

impl CatalogConfig {
    /// Load the product API settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&get_env_or_default(
            "CATALOG_BASE_URL",
            DEFAULT_CATALOG_BASE_URL,
        ))?;
        let cache_ttl = Duration::from_secs(parse_env("CATALOG_CACHE_TTL_SECS", "300")?);
        let timeout = Duration::from_secs(parse_env("CATALOG_TIMEOUT_SECS", "10")?);

        Ok(Self {
            base_url,
            cache_ttl,
            timeout,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse the product API base URL. Only http(s) URLs are accepted, and a
/// trailing slash is ensured so relative paths resolve beneath it.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("CATALOG_BASE_URL".to_string(), msg);

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn default_catalog_url() -> Url {
    Url::parse("https://fakestoreapi.com/").expect("default catalog URL is valid")
}
