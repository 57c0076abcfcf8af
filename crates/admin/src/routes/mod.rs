//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Health check
//! GET  /preview                 - Storefront preview with default settings
//! GET  /negocios/{id}/preview   - Storefront preview of a stored negocio
//! ```

pub mod preview;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the admin server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/preview", get(preview::defaults))
        .route("/negocios/{id}/preview", get(preview::show))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backends.
pub async fn health() -> &'static str {
    "ok"
}
