//! # Error Handling
//!
//! Every fallible operation in the transport layer returns [`CoreError`].
//! Errors fall into a handful of classes:
//!
//! - **Validation**: a required option was missing or empty, no request was sent
//! - **Configuration**: bad service URL, unreadable credentials, unknown auth type
//! - **Authentication**: the token endpoint refused or returned garbage
//! - **Service**: the remote API answered with a non-2xx status
//! - **Transport**: the request never completed (DNS, TLS, connection reset, timeout)
//! - **Deserialization**: a 2xx body could not be decoded into the expected type

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid argument: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("{message} (HTTP {status})")]
    Service {
        status: u16,
        message: String,
        body: Option<Value>,
    },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response body: {0}")]
    Deserialization(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// HTTP status of a service error, if this is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CoreError::Service { status, .. } => Some(*status),
            CoreError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw JSON body the service sent alongside a failure status.
    pub fn body(&self) -> Option<&Value> {
        match self {
            CoreError::Service { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Pull a human-readable message out of an error body.
///
/// The service is not consistent about where it puts the message, so the
/// usual locations are tried in order.
pub fn extract_error_message(body: &Value) -> Option<String> {
    if let Some(msg) = body
        .get("errors")
        .and_then(|errors| errors.get(0))
        .and_then(|first| first.get("message"))
        .and_then(Value::as_str)
    {
        return Some(msg.to_string());
    }

    ["error", "message", "errorMessage"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_message_prefers_errors_array() {
        let body = json!({
            "errors": [{"code": "not_found", "message": "Workspace not found"}],
            "message": "ignored"
        });
        assert_eq!(
            extract_error_message(&body).as_deref(),
            Some("Workspace not found")
        );
    }

    #[test]
    fn test_extract_message_fallbacks() {
        assert_eq!(
            extract_error_message(&json!({"error": "bad token"})).as_deref(),
            Some("bad token")
        );
        assert_eq!(
            extract_error_message(&json!({"errorMessage": "quota"})).as_deref(),
            Some("quota")
        );
        assert_eq!(extract_error_message(&json!({"status": 500})), None);
    }

    #[test]
    fn test_service_error_display_and_status() {
        let err = CoreError::Service {
            status: 404,
            message: "Workspace not found".to_string(),
            body: None,
        };
        assert_eq!(err.to_string(), "Workspace not found (HTTP 404)");
        assert_eq!(err.status_code(), Some(404));
        assert!(err.is_not_found());
        assert!(CoreError::Validation("x".into()).status_code().is_none());
    }
}
