//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_STATIC_DIR` - Stylesheet directory (default: crates/storefront/static)
//! - `STOREFRONT_CURRENCY_SYMBOL` - Symbol shown before prices (default: ৳)
//! - `STOREFRONT_SESSION_IDLE_MINUTES` - Visitor state idle expiry (default: 60)
//! - `STOREFRONT_SECURE_COOKIES` - Mark the session cookie `Secure` (default: false)
//! - `STOREFRONT_LOG_JSON` - Emit JSON log lines (default: false)
//! - `CATALOG_API_URL` - Catalog API base URL (default: <https://openapi.programming-hero.com/api>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Catalog API used when `CATALOG_API_URL` is not set.
pub const DEFAULT_CATALOG_API_URL: &str = "https://openapi.programming-hero.com/api";

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
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Catalog API base URL
    pub catalog_api_url: Url,
    /// Currency symbol rendered before every price
    pub currency_symbol: String,
    /// How long an idle visitor's cart and catalog are kept
    pub session_idle: Duration,
    /// Whether the session cookie requires HTTPS
    pub secure_cookies: bool,
    /// Emit logs as JSON instead of human-readable lines
    pub log_json: bool,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone, Default)]
pub struct SentryConfig {
    /// Sentry DSN; tracking is disabled when absent
    pub dsn: Option<String>,
    /// Environment tag (e.g. "production")
    pub environment: Option<String>,
    /// Error event sample rate
    pub sample_rate: f32,
    /// Performance trace sample rate
    pub traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Source(get);

        let host = env.parse_or("STOREFRONT_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = env.parse_or("STOREFRONT_PORT", 3000_u16)?;
        let static_dir = PathBuf::from(env.or_default("STOREFRONT_STATIC_DIR", "crates/storefront/static"));
        let catalog_api_url = parse_api_url(&env.or_default("CATALOG_API_URL", DEFAULT_CATALOG_API_URL))?;
        let currency_symbol = env.or_default("STOREFRONT_CURRENCY_SYMBOL", "৳");
        let idle_minutes = env.parse_or("STOREFRONT_SESSION_IDLE_MINUTES", 60_u64)?;
        if idle_minutes == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_SESSION_IDLE_MINUTES".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let secure_cookies = env.parse_or("STOREFRONT_SECURE_COOKIES", false)?;
        let log_json = env.parse_or("STOREFRONT_LOG_JSON", false)?;

        let sentry = SentryConfig {
            dsn: env.optional("SENTRY_DSN"),
            environment: env.optional("SENTRY_ENVIRONMENT"),
            sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", 1.0)?,
            traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        };

        Ok(Self {
            host,
            port,
            static_dir,
            catalog_api_url,
            currency_symbol,
            session_idle: Duration::from_secs(idle_minutes * 60),
            secure_cookies,
            log_json,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Source<F>(F);

impl<F: Fn(&str) -> Option<String>> Source<F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

/// Validate the catalog API base URL.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), reason);

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("must be a hierarchical URL".to_string()));
    }
    Ok(url)
}
