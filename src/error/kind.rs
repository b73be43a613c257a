//! Predefined error conditions.
//!
//! Callers branch on [`ErrorKind`] rather than on message text. Every kind has
//! a canonical error value with a fixed message and status code.

use std::borrow::Cow;
use std::fmt;

use super::api::ApiError;
use super::request::RequestError;
use super::stream::StreamError;
use super::tabby_error::TabbyError;

/// Well-known error conditions that can be checked independently of the
/// message carried by an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request parameters are invalid or malformed (400).
    InvalidRequest,
    /// Credentials were missing or rejected (401).
    Authentication,
    /// Credentials lack the privilege for the operation (403).
    Permission,
    /// The requested resource does not exist (404).
    NotFound,
    /// Generic server-side failure (5xx).
    Server,
    /// The request exceeded its deadline (504).
    Timeout,
    /// The request or stream was cancelled by the caller.
    Cancelled,
    /// A receive was attempted on a closed stream.
    StreamClosed,
}

impl ErrorKind {
    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest => "invalid_request",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Permission => "permission",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Server => "server",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::StreamClosed => "stream_closed",
        }
    }

    /// Build the canonical error value for this kind.
    pub fn error(self) -> TabbyError {
        match self {
            ErrorKind::InvalidRequest => RequestError::new_kind(
                Cow::Borrowed("invalid request parameters"),
                Some(400),
                ErrorKind::InvalidRequest,
            )
            .into(),
            ErrorKind::Authentication => ApiError::new(401, "authentication failed").into(),
            ErrorKind::Permission => ApiError::new(403, "permission denied").into(),
            ErrorKind::NotFound => ApiError::new(404, "resource not found").into(),
            ErrorKind::Server => ApiError::new(500, "server error").into(),
            ErrorKind::Timeout => RequestError::timeout().into(),
            ErrorKind::Cancelled => RequestError::cancelled().into(),
            ErrorKind::StreamClosed => StreamError::closed().into(),
        }
    }

    /// Kind implied by an HTTP status code, if any.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(ErrorKind::InvalidRequest),
            401 => Some(ErrorKind::Authentication),
            403 => Some(ErrorKind::Permission),
            404 => Some(ErrorKind::NotFound),
            504 => Some(ErrorKind::Timeout),
            s if s >= 500 => Some(ErrorKind::Server),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ErrorKind> for TabbyError {
    fn from(kind: ErrorKind) -> Self {
        kind.error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorInfo;

    const ALL: [ErrorKind; 8] = [
        ErrorKind::InvalidRequest,
        ErrorKind::Authentication,
        ErrorKind::Permission,
        ErrorKind::NotFound,
        ErrorKind::Server,
        ErrorKind::Timeout,
        ErrorKind::Cancelled,
        ErrorKind::StreamClosed,
    ];

    #[test]
    fn test_canonical_errors_round_trip_their_kind() {
        for kind in ALL {
            let err = kind.error();
            assert_eq!(err.kind(), Some(kind), "kind mismatch for {}", kind);
            assert!(err.is(kind));
        }
    }

    #[test]
    fn test_canonical_status_codes() {
        assert_eq!(ErrorKind::InvalidRequest.error().http_status_code(), 400);
        assert_eq!(ErrorKind::Authentication.error().http_status_code(), 401);
        assert_eq!(ErrorKind::Permission.error().http_status_code(), 403);
        assert_eq!(ErrorKind::NotFound.error().http_status_code(), 404);
        assert_eq!(ErrorKind::Server.error().http_status_code(), 500);
        assert_eq!(ErrorKind::Timeout.error().http_status_code(), 504);
        assert_eq!(ErrorKind::StreamClosed.error().http_status_code(), 500);
    }

    #[test]
    fn test_canonical_messages() {
        assert_eq!(ErrorKind::StreamClosed.error().message(), "stream closed");
        assert_eq!(ErrorKind::Cancelled.error().message(), "request cancelled");
        assert_eq!(ErrorKind::Timeout.error().message(), "request timed out");
    }

    #[test]
    fn test_from_status() {
        assert_eq!(ErrorKind::from_status(400), Some(ErrorKind::InvalidRequest));
        assert_eq!(ErrorKind::from_status(503), Some(ErrorKind::Server));
        assert_eq!(ErrorKind::from_status(504), Some(ErrorKind::Timeout));
        assert_eq!(ErrorKind::from_status(429), None);
        assert_eq!(ErrorKind::from_status(418), None);
    }
}
