//! Client-side request failures.
//!
//! Covers everything that goes wrong before a structured server error can be
//! read: building or serializing the request, the network round trip,
//! deadlines, cancellation, and decoding a successful response body.

use std::borrow::Cow;
use std::fmt;

use super::kind::ErrorKind;
use super::{BoxError, ErrorInfo};

/// Error raised while building, sending, or decoding a request.
#[derive(Debug)]
pub struct RequestError {
    /// Description of the failed step
    pub message: Cow<'static, str>,
    /// HTTP status, when a response had already been received
    pub status_code: Option<u16>,
    source: Option<BoxError>,
    kind: Option<ErrorKind>,
    network: bool,
}

impl RequestError {
    /// Create a request error without an underlying cause.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            source: None,
            kind: None,
            network: false,
        }
    }

    pub(crate) fn new_kind(
        message: Cow<'static, str>,
        status_code: Option<u16>,
        kind: ErrorKind,
    ) -> Self {
        Self {
            message,
            status_code,
            source: None,
            kind: Some(kind),
            network: false,
        }
    }

    /// Create a request error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<Cow<'static, str>>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::new(message)
        }
    }

    /// Wrap a failure reported by the HTTP client.
    ///
    /// Connection, send and timeout failures are flagged as network errors.
    pub fn transport(message: impl Into<Cow<'static, str>>, err: reqwest::Error) -> Self {
        let network = err.is_connect() || err.is_timeout() || err.is_request();
        let kind = err.is_timeout().then_some(ErrorKind::Timeout);
        let status_code = err.status().map(|s| s.as_u16());
        Self {
            message: message.into(),
            status_code,
            source: Some(Box::new(err)),
            kind,
            network,
        }
    }

    /// Wrap a failure to decode a response body that arrived with `status`.
    pub fn decode(
        message: impl Into<Cow<'static, str>>,
        status: u16,
        source: impl Into<BoxError>,
    ) -> Self {
        Self {
            status_code: Some(status),
            ..Self::with_source(message, source)
        }
    }

    /// The request exceeded the configured deadline.
    pub fn timeout() -> Self {
        Self {
            network: true,
            ..Self::new_kind(Cow::Borrowed("request timed out"), Some(504), ErrorKind::Timeout)
        }
    }

    /// The request was cancelled by the caller.
    pub fn cancelled() -> Self {
        Self::new_kind(Cow::Borrowed("request cancelled"), None, ErrorKind::Cancelled)
    }

    /// Predefined condition this error represents, if any.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.kind
    }

    /// Whether the failure happened on the wire (connect, send, timeout).
    pub fn is_network(&self) -> bool {
        self.network
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "request error: {}: {}", self.message, source),
            None => write!(f, "request error: {}", self.message),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl ErrorInfo for RequestError {
    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> &str {
        "request_error"
    }

    fn http_status_code(&self) -> u16 {
        self.status_code.unwrap_or(500)
    }
}
