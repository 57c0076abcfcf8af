//! Authentication commands.
//!
//! # Usage
//!
//! ```bash
//! ACACLICK_PASSWORD=... acaclick login -c owner@example.com --show-token
//! ```

use acaclick_admin::api::{ApiClient, ApiError, Credentials};
use secrecy::ExposeSecret;

/// Exchange credentials for a token pair and report the account's profile.
///
/// # Errors
///
/// Returns `ApiError` if the credentials are rejected or a service is down.
pub async fn login(
    api: &ApiClient,
    correo: String,
    password: String,
    show_token: bool,
) -> Result<(), ApiError> {
    let credentials = Credentials::new(correo, password);
    let tokens = api.issue_token(&credentials).await.inspect_err(|e| {
        tracing::error!("{}", e.user_message("Credenciales inválidas"));
    })?;
    let user = api.current_user(&tokens.access).await?;

    tracing::info!("Logged in as {} <{}>", user.display_name(), user.correo);
    tracing::info!("  User ID: {}", user.id_usuario);
    if let Some(rol) = &user.rol {
        tracing::info!("  Role: {}", rol.nombre_rol);
    }
    if let Some(tenant) = user.tenant_id {
        tracing::info!("  Tenant: {}", tenant);
    }

    if show_token {
        tracing::info!("export ACACLICK_TOKEN={}", tokens.access.expose_secret());
    }
    Ok(())
}
