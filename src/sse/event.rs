//! SSE event type and parsing.

use serde::de::DeserializeOwned;

use crate::error::{StreamError, TabbyResult};

/// Data payload the server sends to mark the end of a generation stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Event type used when an event carries no `event:` field.
const DEFAULT_EVENT_TYPE: &str = "message";

/// One parsed SSE record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Value of the `id:` field, if one was sent
    pub id: Option<String>,
    /// Value of the `event:` field, `message` by default
    pub event: String,
    /// All `data:` lines joined with `\n`
    pub data: String,
}

impl Default for Event {
    fn default() -> Self {
        Self {
            id: None,
            event: DEFAULT_EVENT_TYPE.to_string(),
            data: String::new(),
        }
    }
}

impl Event {
    /// Decode the data payload as JSON.
    pub fn decode<T: DeserializeOwned>(&self) -> TabbyResult<T> {
        serde_json::from_str(&self.data)
            .map_err(|e| StreamError::with_source("failed to decode event data", e).into())
    }

    /// Whether this is the `[DONE]` terminator.
    pub fn is_done(&self) -> bool {
        self.data == DONE_SENTINEL
    }
}

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// `id:` field
    Id(String),
    /// `event:` field
    Event(String),
    /// `data:` field
    Data(String),
    /// Line starting with `:`
    Comment,
    /// Blank line, unknown field, or a line without a colon
    Ignored,
}

/// Classify a single line, already stripped of its line terminator.
///
/// The three known prefixes are checked first, then comments, then a lenient
/// `name : value` split for lines with stray whitespace around the field name.
pub fn parse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Ignored;
    }

    if let Some(rest) = line.strip_prefix("id:") {
        return SseLine::Id(rest.trim().to_string());
    }
    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }
    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }
    if line.starts_with(':') {
        return SseLine::Comment;
    }

    match line.split_once(':') {
        Some((field, value)) => {
            let value = value.trim().to_string();
            match field.trim() {
                "id" => SseLine::Id(value),
                "event" => SseLine::Event(value),
                "data" => SseLine::Data(value),
                _ => SseLine::Ignored,
            }
        }
        None => SseLine::Ignored,
    }
}

/// Parse one event block (the lines between two blank lines).
///
/// Never fails: unrecognised lines are skipped.
pub fn parse_event(block: &str) -> Event {
    let mut event = Event::default();
    let mut data: Vec<String> = Vec::new();

    for line in block.split('\n') {
        match parse_line(line.trim_end_matches('\r')) {
            SseLine::Id(id) => event.id = Some(id),
            SseLine::Event(kind) if !kind.is_empty() => event.event = kind,
            SseLine::Data(value) => data.push(value),
            SseLine::Event(_) | SseLine::Comment | SseLine::Ignored => {}
        }
    }

    event.data = data.join("\n");
    event
}
