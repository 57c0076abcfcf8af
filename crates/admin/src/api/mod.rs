//! HTTP client for the AcaClick backend services.
//!
//! One client covers both services:
//!
//! | Service  | Base URL (config)   | Endpoints |
//! |----------|---------------------|-----------|
//! | auth     | `AUTH_API_URL`      | `POST /auth/token/`, `GET /auth/me/` |
//! | negocios | `NEGOCIOS_API_URL`  | `GET /negocios/`, `GET /negocios/usuario/{id}/`, `GET /negocios/{id}/`, `POST /negocios/crear/`, `POST /negocios/{id}/personalizar/` |
//!
//! Every call is a single attempt with no retry. Failures are classified
//! into [`ApiError`] so callers can pick the message to show.

mod error;
mod types;

pub use error::*;
pub use types::*;

use std::sync::Arc;

use acaclick_core::{CreateNegocioPayload, CustomizationDraft, NegocioId, UsuarioId};
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::config::ApiConfig;

/// Client for the auth and negocios services.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    auth_base: Url,
    negocios_base: Url,
    access_token: Option<SecretString>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("auth_base", &self.inner.auth_base.as_str())
            .field("negocios_base", &self.inner.negocios_base.as_str())
            .field(
                "access_token",
                &self.inner.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl ApiClient {
    /// Create a client for the configured base URLs.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("acaclick-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                auth_base: config.auth_url.clone(),
                negocios_base: config.negocios_url.clone(),
                access_token: None,
            }),
        })
    }

    /// A client that sends `Authorization: Bearer <token>` to the negocios service.
    #[must_use]
    pub fn with_access_token(&self, token: SecretString) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: self.inner.client.clone(),
                auth_base: self.inner.auth_base.clone(),
                negocios_base: self.inner.negocios_base.clone(),
                access_token: Some(token),
            }),
        }
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Exchange credentials for an access/refresh token pair.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    #[instrument(skip(self, credentials), fields(correo = %credentials.correo))]
    pub async fn issue_token(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        let url = join(&self.inner.auth_base, "auth/token/")?;
        let request = self.inner.client.post(url).json(credentials);
        send(request).await
    }

    /// Fetch the profile of the user owning `access`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    #[instrument(skip(self, access))]
    pub async fn current_user(&self, access: &SecretString) -> Result<CurrentUser, ApiError> {
        let url = join(&self.inner.auth_base, "auth/me/")?;
        let request = self.inner.client.get(url).bearer_auth(access.expose_secret());
        send(request).await
    }

    // =========================================================================
    // Negocios
    // =========================================================================

    /// List every active business.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    #[instrument(skip(self))]
    pub async fn list_negocios(&self) -> Result<Vec<Negocio>, ApiError> {
        self.get_negocios("negocios/").await
    }

    /// List the active businesses owned by `usuario`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    #[instrument(skip(self))]
    pub async fn list_negocios_for_user(
        &self,
        usuario: UsuarioId,
    ) -> Result<Vec<Negocio>, ApiError> {
        self.get_negocios(&format!("negocios/usuario/{usuario}/"))
            .await
    }

    /// Fetch one business record, including its `personalizacion`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with status 404 for unknown ids.
    #[instrument(skip(self))]
    pub async fn get_negocio(&self, id: NegocioId) -> Result<Negocio, ApiError> {
        self.get_negocios(&format!("negocios/{id}/")).await
    }

    /// Register a new business.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`]; rejections carry the server's message extracted
    /// with [`extract_error_message`].
    #[instrument(skip(self, payload), fields(business_name = %payload.business_name))]
    pub async fn create_negocio(
        &self,
        payload: &CreateNegocioPayload,
    ) -> Result<Negocio, ApiError> {
        self.post_negocios("negocios/crear/", payload).await
    }

    /// Replace the stored personalization of a business with `draft`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    #[instrument(skip(self, draft))]
    pub async fn personalize_negocio(
        &self,
        id: NegocioId,
        draft: &CustomizationDraft,
    ) -> Result<PersonalizeAck, ApiError> {
        self.post_negocios(&format!("negocios/{id}/personalizar/"), draft)
            .await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    async fn get_negocios<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = join(&self.inner.negocios_base, path)?;
        send(self.authorize(self.inner.client.get(url))).await
    }

    async fn post_negocios<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = join(&self.inner.negocios_base, path)?;
        send(self.authorize(self.inner.client.post(url).json(body))).await
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.inner.access_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }
}

/// Send a request, mapping connection failures to [`ApiError::Transport`].
async fn send<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ApiError> {
    let response = request.send().await.map_err(|e| {
        tracing::error!(error = %e, "Backend unreachable");
        ApiError::Transport(e)
    })?;
    handle_response(response).await
}

/// Classify a response: decoded JSON on 2xx, [`ApiError`] otherwise.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    let text = response.text().await.map_err(ApiError::Transport)?;

    if !is_json {
        let snippet = excerpt(&text, BODY_EXCERPT_CHARS);
        tracing::error!(
            status = status.as_u16(),
            body = %snippet,
            "Backend returned a non-JSON response"
        );
        return Err(ApiError::NonJson {
            status: status.as_u16(),
            excerpt: snippet,
        });
    }

    if status.is_success() {
        return serde_json::from_str(&text).map_err(|e| {
            tracing::error!(status = status.as_u16(), error = %e, "Unexpected response shape");
            ApiError::Decode(e.to_string())
        });
    }

    let body: Value = serde_json::from_str(&text).map_err(|_| ApiError::NonJson {
        status: status.as_u16(),
        excerpt: excerpt(&text, BODY_EXCERPT_CHARS),
    })?;
    let message = extract_error_message(&body);
    tracing::warn!(
        status = status.as_u16(),
        message = message.as_deref().unwrap_or(""),
        "Backend rejected request"
    );
    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
        body,
    })
}

/// Join a relative endpoint path onto a base URL, keeping the base path.
fn join(base: &Url, path: &str) -> Result<Url, ApiError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    Ok(base.join(path)?)
}
