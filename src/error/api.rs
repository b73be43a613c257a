//! Errors reported by the server in a non-2xx response.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::kind::ErrorKind;
use super::ErrorInfo;

/// Machine code for an HTTP status, as returned by [`ApiError::code`].
///
/// Callers branch on these strings, so the table is fixed.
pub fn status_code_to_code(status: u16) -> &'static str {
    match status {
        400 => "invalid_request",
        401 => "authentication_error",
        403 => "permission_error",
        404 => "not_found",
        429 => "rate_limit_exceeded",
        s if s >= 500 => "server_error",
        _ => "api_error",
    }
}

/// Error returned by the server.
///
/// This is also the shape of the JSON error body the server sends:
/// `{"status_code": 400, "message": "...", "details": ..., "request_id": "..."}`.
/// The transport always overwrites `status_code` with the status of the
/// actual HTTP response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP status code of the response
    #[serde(default)]
    pub status_code: u16,
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
    /// Extra structured information, shape depends on the endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Server-side request identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ApiError {
    /// Create an API error with a status code and message.
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            details: None,
            request_id: None,
        }
    }

    /// Machine code derived from the status code.
    pub fn code(&self) -> &'static str {
        status_code_to_code(self.status_code)
    }

    /// Predefined condition implied by the status code.
    pub fn kind(&self) -> Option<ErrorKind> {
        ErrorKind::from_status(self.status_code)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.request_id {
            Some(id) if !id.is_empty() => write!(
                f,
                "API error (status {}, request id {}): {}",
                self.status_code, id, self.message
            ),
            _ => write!(f, "API error (status {}): {}", self.status_code, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ErrorInfo for ApiError {
    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> &str {
        ApiError::code(self)
    }

    fn http_status_code(&self) -> u16 {
        self.status_code
    }
}
