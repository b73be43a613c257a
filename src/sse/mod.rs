//! Server-Sent Events stream engine.
//!
//! The server streams generation progress as SSE:
//! - `data: <json>` - payload line, repeated lines are joined with `\n`
//! - `event: <type>` - event type, `message` when absent
//! - `id: <id>` - event identifier
//! - Lines starting with `:` - comments (ignored)
//! - Empty line - ends the event
//!
//! # Module structure
//! - `event` - [`Event`] and the text-to-event parser
//! - `framer` - [`EventFramer`], splits raw bytes into event blocks
//! - `stream` - [`Stream`], the typed, cancellable cursor over a response body

mod event;
mod framer;
mod stream;

pub use event::{parse_event, parse_line, Event, SseLine, DONE_SENTINEL};
pub use framer::EventFramer;
pub use stream::{ByteStream, Stream};
