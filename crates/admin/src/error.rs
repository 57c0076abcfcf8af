//! Unified error handling for the admin preview server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::ApiError;

/// Application-level error type for the admin server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A backend call failed.
    #[error("Backend error: {0}")]
    Api(ApiError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        if err.is_not_found() {
            Self::NotFound(err.user_message("Negocio no encontrado"))
        } else {
            Self::Api(err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Api(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = match &self {
            Self::Api(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Api(_) => "External service error".to_string(),
            Self::NotFound(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("negocio 9".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Api(ApiError::Decode("bad".to_string()))),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_backend_404_becomes_not_found() {
        let err = AppError::from(ApiError::Rejected {
            status: 404,
            message: Some("Negocio no encontrado".to_string()),
            body: json!({"error": "Negocio no encontrado"}),
        });
        assert_eq!(err.to_string(), "Not found: Negocio no encontrado");
    }
}
