//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `CATALOG_SOURCE_URL` - Placeholder list endpoint products are derived from
//!   (default: <https://jsonplaceholder.typicode.com/posts>)
//! - `CATALOG_CACHE_TTL_SECS` - How long fetched source records are cached (default: 300, 0 disables)
//! - `CATALOG_SEED` - When set, product prices and categories are seeded per id
//!   and stay stable across page views
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use mockshop_core::AttributeMode;
use thiserror::Error;
use url::Url;

const DEFAULT_SOURCE_URL: &str = "https://jsonplaceholder.typicode.com/posts";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

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
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Mock catalog configuration
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Mock catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Generic list endpoint products are derived from
    pub source_url: Url,
    /// TTL for cached source records (zero disables caching)
    pub cache_ttl: Duration,
    /// How random product attributes are drawn
    pub attributes: AttributeMode,
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

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_or(&lookup, "STOREFRONT_HOST", "127.0.0.1", str::parse::<IpAddr>)?;
        let port = parse_or(&lookup, "STOREFRONT_PORT", "3000", str::parse::<u16>)?;
        let base_url = parse_or(
            &lookup,
            "STOREFRONT_BASE_URL",
            "http://localhost:3000",
            Url::parse,
        )?;

        let catalog = CatalogConfig::from_lookup(&lookup)?;

        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        let sentry_environment = lookup("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_or(&lookup, "SENTRY_SAMPLE_RATE", "1.0", str::parse::<f32>)?;
        let sentry_traces_sample_rate =
            parse_or(&lookup, "SENTRY_TRACES_SAMPLE_RATE", "0.0", str::parse::<f32>)?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

impl CatalogConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let source_url = parse_or(lookup, "CATALOG_SOURCE_URL", DEFAULT_SOURCE_URL, Url::parse)?;
        let cache_ttl = parse_or(
            lookup,
            "CATALOG_CACHE_TTL_SECS",
            &DEFAULT_CACHE_TTL_SECS.to_string(),
            str::parse::<u64>,
        )
        .map(Duration::from_secs)?;

        let attributes = match lookup("CATALOG_SEED") {
            Some(raw) => {
                let seed = raw.trim().parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("CATALOG_SEED".to_string(), e.to_string())
                })?;
                AttributeMode::Stable { seed }
            }
            None => AttributeMode::Fresh,
        };

        Ok(Self {
            source_url,
            cache_ttl,
            attributes,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to a default when it is unset.
fn parse_or<T, E: std::fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
    parse: impl Fn(&str) -> Result<T, E>,
) -> Result<T, ConfigError> {
    let value = lookup(key).unwrap_or_else(|| default.to_string());
    parse(value.trim()).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
