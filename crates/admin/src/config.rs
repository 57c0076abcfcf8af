//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Backend services
//! - `AUTH_API_URL` - Auth service base URL (default: `http://127.0.0.1:8001/api`)
//! - `NEGOCIOS_API_URL` - Negocios service base URL (default: `http://127.0.0.1:8002/api`)
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)
//!
//! ## Image ingestion
//! - `MAX_IMAGE_BYTES` - Limit for logos and storefront images read from disk (default: 5 MiB)

use std::net::{IpAddr, SocketAddr};

use acaclick_core::EncodedImage;
use thiserror::Error;
use url::Url;

const DEFAULT_AUTH_API_URL: &str = "http://127.0.0.1:8001/api";
const DEFAULT_NEGOCIOS_API_URL: &str = "http://127.0.0.1:8002/api";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Base URLs of the backend services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Auth service, e.g. `http://127.0.0.1:8001/api`
    pub auth_url: Url,
    /// Negocios service, e.g. `http://127.0.0.1:8002/api`
    pub negocios_url: Url,
}

impl ApiConfig {
    /// Both services on their default local ports.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the defaults are valid URLs.
    pub fn local() -> Result<Self, ConfigError> {
        Ok(Self {
            auth_url: parse_base_url("AUTH_API_URL", DEFAULT_AUTH_API_URL)?,
            negocios_url: parse_base_url("NEGOCIOS_API_URL", DEFAULT_NEGOCIOS_API_URL)?,
        })
    }

    /// Load only the backend URLs.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a URL does not parse or is
    /// not http(s).
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            auth_url: get_url_or_default("AUTH_API_URL", DEFAULT_AUTH_API_URL)?,
            negocios_url: get_url_or_default("NEGOCIOS_API_URL", DEFAULT_NEGOCIOS_API_URL)?,
        })
    }
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Backend service URLs
    pub api: ApiConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api = ApiConfig::from_env()?;
        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            api,
            host,
            port,
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
}

/// Image size limit from `MAX_IMAGE_BYTES`, or the 5 MiB default.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` unless the value is a positive
/// byte count.
pub fn max_image_bytes_from_env() -> Result<usize, ConfigError> {
    parse_max_image_bytes(get_optional_env("MAX_IMAGE_BYTES"))
}

fn parse_max_image_bytes(raw: Option<String>) -> Result<usize, ConfigError> {
    raw.map_or(Ok(EncodedImage::DEFAULT_MAX_BYTES), |raw| {
        raw.trim().parse::<usize>().ok().filter(|n| *n > 0).ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "MAX_IMAGE_BYTES".to_string(),
                format!("expected a positive byte count, got '{raw}'"),
            )
        })
    })
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

/// Get an http(s) base URL from the environment.
fn get_url_or_default(key: &str, default: &str) -> Result<Url, ConfigError> {
    parse_base_url(key, &get_env_or_default(key, default))
}

fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_urls() {
        let api = ApiConfig::local().unwrap();
        assert_eq!(api.auth_url.as_str(), "http://127.0.0.1:8001/api");
        assert_eq!(api.negocios_url.as_str(), "http://127.0.0.1:8002/api");
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        let err = parse_base_url("AUTH_API_URL", "ftp://example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "AUTH_API_URL"));
        assert!(parse_base_url("AUTH_API_URL", "not a url").is_err());
        assert!(parse_base_url("AUTH_API_URL", " https://api.acaclick.mx/api ").is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = AdminConfig {
            api: ApiConfig::local().unwrap(),
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        };
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3001);
    }

    #[test]
    fn test_max_image_bytes() {
        assert_eq!(parse_max_image_bytes(None).unwrap(), 5 * 1024 * 1024);
        assert_eq!(
            parse_max_image_bytes(Some(" 2048 ".to_string())).unwrap(),
            2048
        );
        assert!(parse_max_image_bytes(Some("0".to_string())).is_err());
        assert!(parse_max_image_bytes(Some("5MB".to_string())).is_err());
    }
}
