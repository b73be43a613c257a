//! Error handling for the TabbyAPI client.
//!
//! Three error families cover every failure the client can report:
//!
//! | Type | Raised when | `code()` |
//! |------|-------------|----------|
//! | [`ApiError`] | the server answered with a non-2xx status | derived from the status |
//! | [`RequestError`] | building, sending or decoding a request failed | `request_error` |
//! | [`StreamError`] | reading or decoding an open event stream failed | `stream_error` |
//!
//! All three, and the umbrella [`TabbyError`], implement [`ErrorInfo`].
//! [`ErrorKind`] names the predefined conditions for message-independent checks.
//!
//! # Example
//!
//! ```ignore
//! use tabby_client::error::{ErrorInfo, ErrorKind};
//!
//! match client.models().get().await {
//!     Ok(model) => println!("loaded: {}", model.id),
//!     Err(err) if err.is(ErrorKind::NotFound) => println!("no model loaded"),
//!     Err(err) => eprintln!("{} ({})", err, err.code()),
//! }
//! ```

mod api;
mod kind;
mod request;
mod result;
mod stream;
mod tabby_error;

pub use api::{status_code_to_code, ApiError};
pub use kind::ErrorKind;
pub use request::RequestError;
pub use result::TabbyResult;
pub use stream::StreamError;
pub use tabby_error::TabbyError;

/// Boxed cause attached to request and stream errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Capability shared by every client error.
pub trait ErrorInfo: std::error::Error {
    /// Human-readable message, without the wrapped cause.
    fn message(&self) -> &str;

    /// Machine-readable code callers can branch on.
    fn code(&self) -> &str;

    /// HTTP status associated with the error.
    fn http_status_code(&self) -> u16;
}
