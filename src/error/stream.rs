//! Streaming-related error types.
//!
//! Errors raised while consuming an open Server-Sent Events stream: reading
//! the body, decoding an event payload, or using a stream after close.

use std::borrow::Cow;
use std::fmt;

use super::kind::ErrorKind;
use super::{BoxError, ErrorInfo};

/// Error raised while reading from an open stream.
#[derive(Debug)]
pub struct StreamError {
    /// Description of the failed step
    pub message: Cow<'static, str>,
    source: Option<BoxError>,
    kind: Option<ErrorKind>,
}

impl StreamError {
    /// Create a stream error without an underlying cause.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            source: None,
            kind: None,
        }
    }

    /// Create a stream error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<Cow<'static, str>>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
            kind: None,
        }
    }

    /// The stream was already closed.
    pub fn closed() -> Self {
        Self {
            message: Cow::Borrowed("stream closed"),
            source: None,
            kind: Some(ErrorKind::StreamClosed),
        }
    }

    /// Whether this is the closed-stream error.
    pub fn is_closed(&self) -> bool {
        self.kind == Some(ErrorKind::StreamClosed)
    }

    /// Predefined condition this error represents, if any.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.kind
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "stream error: {}: {}", self.message, source),
            None => write!(f, "stream error: {}", self.message),
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl ErrorInfo for StreamError {
    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> &str {
        "stream_error"
    }

    fn http_status_code(&self) -> u16 {
        500
    }
}
