//! Integration test support for AcaClick.
//!
//! [`StubBackend`] stands in for both the auth and the negocios service: an
//! axum server on an ephemeral port that answers from a table of canned
//! responses and records every request it receives.
//!
//! ```rust,ignore
//! let backend = StubBackend::start().await;
//! backend.respond("GET", "/api/negocios/1/", StubResponse::json(200, json!({...})));
//! let api = backend.client();
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use acaclick_admin::api::ApiClient;
use acaclick_admin::config::ApiConfig;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use url::Url;

/// A canned response.
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl StubResponse {
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    #[must_use]
    pub fn html(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/html; charset=utf-8",
            body: body.to_owned(),
        }
    }
}

/// A request the stub received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct StubState {
    routes: HashMap<(String, String), StubResponse>,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<StubState>>;

/// Auth and negocios services on one ephemeral port, both under `/api`.
pub struct StubBackend {
    addr: SocketAddr,
    state: Shared,
    server: JoinHandle<()>,
}

impl StubBackend {
    /// Bind `127.0.0.1:0` and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let state = Shared::default();
        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend");
        let addr = listener.local_addr().expect("Stub backend has no address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            addr,
            state,
            server,
        }
    }

    /// Answer `method path` with `response` from now on.
    pub fn respond(&self, method: &str, path: &str, response: StubResponse) {
        self.lock()
            .routes
            .insert((method.to_owned(), path.to_owned()), response);
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests received for `method path`.
    #[must_use]
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Base URL shared by both services.
    ///
    /// # Panics
    ///
    /// Panics if the bound address does not form a URL.
    #[must_use]
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/api", self.addr)).expect("Stub URL is valid")
    }

    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            auth_url: self.base_url(),
            negocios_url: self.base_url(),
        }
    }

    /// An API client pointed at this stub.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.api_config()).expect("Failed to build API client")
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_owned();
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = serde_json::from_slice(&body).ok();

    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
    state.requests.push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        authorization,
        body,
    });

    let canned = state.routes.get(&(method.to_string(), path)).cloned();
    drop(state);

    let response = canned
        .unwrap_or_else(|| StubResponse::json(404, &json!({"detail": "No encontrado."})));
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, response.content_type)],
        response.body,
    )
        .into_response()
}

/// A negocio record as the negocios service returns it.
#[must_use]
pub fn negocio_record(id: i64, nombre: &str, personalizacion: &Value) -> Value {
    json!({
        "id_negocio": id,
        "nombre": nombre,
        "tipo": "restaurante",
        "descripcion": null,
        "correo": "hola@example.com",
        "telefono": "5512345678",
        "direccion": "Calle 5 de Mayo 10, CDMX",
        "latitud": "19.432600",
        "longitud": "-99.133200",
        "horario_apertura": "09:00:00",
        "horario_cierre": "17:00:00",
        "sitio_web": null,
        "facebook": null,
        "instagram": null,
        "twitter": null,
        "logo_url": null,
        "personalizacion": personalizacion,
        "id_usuario": 7,
        "tenant_id": "6f1c2a4e-3b9d-4c8e-9a51-2d7f0e8b6c13",
        "activo": true,
        "creado_en": "2025-03-01T12:00:00Z",
        "actualizado_en": "2025-03-02T08:30:00.123456"
    })
}
