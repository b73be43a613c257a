//! Unified error type for the client.
//!
//! `TabbyError` wraps the three error families so every public operation has
//! a single error type, while the concrete error stays reachable by matching.

use thiserror::Error;

use super::api::ApiError;
use super::kind::ErrorKind;
use super::request::RequestError;
use super::stream::StreamError;
use super::ErrorInfo;

/// Any error produced by the client.
#[derive(Debug, Error)]
pub enum TabbyError {
    /// The server reported an error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Building, sending, or decoding a request failed.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Reading or decoding a stream failed.
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl TabbyError {
    /// Canonical cancellation error.
    pub fn cancelled() -> Self {
        RequestError::cancelled().into()
    }

    /// Predefined condition this error represents, if any.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            TabbyError::Api(err) => err.kind(),
            TabbyError::Request(err) => err.kind(),
            TabbyError::Stream(err) => err.kind(),
        }
    }

    /// Check for a predefined condition without comparing messages.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == Some(kind)
    }

    /// Whether retrying the same request may succeed.
    ///
    /// Network failures and 5xx responses are transient, everything else is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            TabbyError::Api(err) => err.status_code >= 500,
            TabbyError::Request(err) => err.is_network(),
            TabbyError::Stream(_) => false,
        }
    }

    /// The API error, if the server reported one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            TabbyError::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl ErrorInfo for TabbyError {
    fn message(&self) -> &str {
        match self {
            TabbyError::Api(err) => ErrorInfo::message(err),
            TabbyError::Request(err) => err.message(),
            TabbyError::Stream(err) => err.message(),
        }
    }

    fn code(&self) -> &str {
        match self {
            TabbyError::Api(err) => err.code(),
            TabbyError::Request(err) => ErrorInfo::code(err),
            TabbyError::Stream(err) => ErrorInfo::code(err),
        }
    }

    fn http_status_code(&self) -> u16 {
        match self {
            TabbyError::Api(err) => err.http_status_code(),
            TabbyError::Request(err) => err.http_status_code(),
            TabbyError::Stream(err) => err.http_status_code(),
        }
    }
}
