//! API client errors and user-facing error messages.

use serde_json::Value;
use thiserror::Error;

/// Shown when the backend could not be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Error de red al contactar el servidor. Asegúrate de que el servidor esté corriendo.";

/// Shown when the backend answered with something other than JSON.
pub const SERVER_ERROR_MESSAGE: &str =
    "Error del servidor. Revisa la consola para más detalles.";

/// Maximum number of characters of a non-JSON body kept for logging.
pub const BODY_EXCERPT_CHARS: usize = 500;

/// Errors that can occur when talking to the auth or negocios services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a body that is not JSON.
    #[error("server returned a non-JSON response (HTTP {status})")]
    NonJson { status: u16, excerpt: String },

    /// The server answered with a non-2xx status and a JSON body.
    #[error("server rejected the request (HTTP {status}): {}", message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
        body: Value,
    },

    /// A 2xx JSON body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A request URL could not be built.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Text to show the operator for this failure.
    ///
    /// Structured rejections surface the server's own message verbatim;
    /// `fallback` is used when the body carries none, or for decode errors.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Transport(_) => NETWORK_ERROR_MESSAGE.to_owned(),
            Self::NonJson { .. } => SERVER_ERROR_MESSAGE.to_owned(),
            Self::Rejected { message, .. } => {
                message.clone().unwrap_or_else(|| fallback.to_owned())
            }
            Self::Decode(_) | Self::Url(_) => fallback.to_owned(),
        }
    }

    /// HTTP status of the response, if one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::NonJson { status, .. } | Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }
}

/// Pull the message to show out of a JSON error body.
///
/// Precedence:
/// 1. `error` (with `": {detail}"` appended when `detail` is also present)
/// 2. `detail`
/// 3. the first string found across the remaining values, flattening
///    arrays, in response order (the field-error map DRF returns)
#[must_use]
pub fn extract_error_message(body: &Value) -> Option<String> {
    let Value::Object(map) = body else {
        return None;
    };

    let error = map.get("error").and_then(Value::as_str);
    let detail = map.get("detail").and_then(Value::as_str);
    match (error, detail) {
        (Some(error), Some(detail)) => return Some(format!("{error}: {detail}")),
        (Some(error), None) => return Some(error.to_owned()),
        (None, Some(detail)) => return Some(detail.to_owned()),
        (None, None) => {}
    }

    map.values()
        .flat_map(|value| match value {
            Value::Array(items) => items.iter().collect::<Vec<_>>(),
            other => vec![other],
        })
        .find_map(Value::as_str)
        .map(str::to_owned)
}

/// First `max` characters of `text`, cut on a char boundary.
#[must_use]
pub fn excerpt(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
