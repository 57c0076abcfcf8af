//! Command implementations.

pub mod auth;
pub mod negocios;

use acaclick_admin::api::{ApiClient, ApiError};
use acaclick_admin::config::{self, ApiConfig, ConfigError};
use acaclick_admin::media::MediaIngestor;
use secrecy::SecretString;
use thiserror::Error;

/// Errors shared by every command.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Backend URLs are missing or malformed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client could not be built.
    #[error("Client error: {0}")]
    Client(#[from] ApiError),
}

/// Build the API client from the environment, attaching `token` if given.
///
/// # Errors
///
/// Returns `SetupError` if the configuration is invalid.
pub fn api_client(token: Option<SecretString>) -> Result<ApiClient, SetupError> {
    let config = ApiConfig::from_env()?;
    tracing::debug!(
        auth_url = %config.auth_url,
        negocios_url = %config.negocios_url,
        "Using backend services"
    );
    let client = ApiClient::new(&config)?;
    Ok(match token {
        Some(token) => client.with_access_token(token),
        None => client,
    })
}

/// Image ingestion limited by `MAX_IMAGE_BYTES`.
///
/// # Errors
///
/// Returns `SetupError` if the limit is not a positive byte count.
pub fn media_ingestor() -> Result<MediaIngestor, SetupError> {
    Ok(MediaIngestor::new(config::max_image_bytes_from_env()?))
}
