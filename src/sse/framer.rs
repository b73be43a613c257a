//! Byte-level SSE framing.
//!
//! Transport chunks never line up with event boundaries, so bytes are
//! buffered until a full line is available and lines are accumulated until a
//! blank line (`\n` or `\r\n`) closes the event. Text is decoded only once a
//! whole event is available, which keeps multi-byte characters split across
//! chunks intact.

use bytes::BytesMut;

/// Incremental splitter turning raw bytes into event blocks.
#[derive(Debug, Default)]
pub struct EventFramer {
    /// Bytes not yet consumed as a complete line
    pending: BytesMut,
    /// Offset into `pending` already searched for a newline
    scanned: usize,
    /// Lines of the event being accumulated
    event: Vec<u8>,
}

impl EventFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk read from the transport.
    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    /// Pop the next complete event block, if one is buffered.
    ///
    /// Consecutive blank lines are skipped.
    pub fn next_event(&mut self) -> Option<String> {
        loop {
            let newline = self.pending[self.scanned..].iter().position(|&b| b == b'\n');
            let Some(offset) = newline else {
                self.scanned = self.pending.len();
                return None;
            };

            let line = self.pending.split_to(self.scanned + offset + 1);
            self.scanned = 0;

            if line[..] == b"\n"[..] || line[..] == b"\r\n"[..] {
                if self.event.is_empty() {
                    continue;
                }
                return Some(self.take_event());
            }

            self.event.extend_from_slice(&line);
        }
    }

    /// Flush at end of input.
    ///
    /// Returns the accumulated event, including a final line that never got
    /// its terminator.
    pub fn finish(&mut self) -> Option<String> {
        if !self.pending.is_empty() {
            let rest = self.pending.split();
            self.event.extend_from_slice(&rest);
        }
        self.scanned = 0;

        if self.event.iter().all(u8::is_ascii_whitespace) {
            self.event.clear();
            return None;
        }
        Some(self.take_event())
    }

    /// Bytes held back waiting for more input.
    pub fn buffered_len(&self) -> usize {
        self.pending.len() + self.event.len()
    }

    fn take_event(&mut self) -> String {
        let raw = std::mem::take(&mut self.event);
        tracing::trace!("framed SSE event ({} bytes)", raw.len());
        match String::from_utf8(raw) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(framer: &mut EventFramer) -> Vec<String> {
        std::iter::from_fn(|| framer.next_event()).collect()
    }

    #[test]
    fn test_single_chunk_multiple_events() {
        let mut framer = EventFramer::new();
        framer.push(b"data: one\n\ndata: two\n\n");
        assert_eq!(drain(&mut framer), vec!["data: one\n", "data: two\n"]);
        assert_eq!(framer.finish(), None);
    }

    #[test]
    fn test_event_split_across_chunks() {
        let mut framer = EventFramer::new();
        framer.push(b"da");
        assert_eq!(framer.next_event(), None);
        framer.push(b"ta: hel");
        assert_eq!(framer.next_event(), None);
        framer.push(b"lo\n");
        assert_eq!(framer.next_event(), None);
        framer.push(b"\n");
        assert_eq!(framer.next_event().as_deref(), Some("data: hello\n"));
    }

    #[test]
    fn test_crlf_terminators() {
        let mut framer = EventFramer::new();
        framer.push(b"data: a\r\n\r\ndata: b\r\n\r\n");
        assert_eq!(drain(&mut framer), vec!["data: a\r\n", "data: b\r\n"]);
    }

    #[test]
    fn test_consecutive_blank_lines_are_skipped() {
        let mut framer = EventFramer::new();
        framer.push(b"\n\n\r\ndata: x\n\n\n\n");
        assert_eq!(drain(&mut framer), vec!["data: x\n"]);
    }

    #[test]
    fn test_finish_returns_unterminated_event() {
        let mut framer = EventFramer::new();
        framer.push(b"data: first\n\ndata: last\n");
        assert_eq!(drain(&mut framer), vec!["data: first\n"]);
        assert_eq!(framer.finish().as_deref(), Some("data: last\n"));
        assert_eq!(framer.finish(), None);
    }

    #[test]
    fn test_finish_includes_partial_line() {
        let mut framer = EventFramer::new();
        framer.push(b"data: {\"a\":1}");
        assert_eq!(framer.next_event(), None);
        assert_eq!(framer.finish().as_deref(), Some("data: {\"a\":1}"));
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let text = "data: héllo\n\n".as_bytes();
        let split = text.iter().position(|&b| b == 0xC3).unwrap() + 1;
        let mut framer = EventFramer::new();
        framer.push(&text[..split]);
        assert_eq!(framer.next_event(), None);
        framer.push(&text[split..]);
        assert_eq!(framer.next_event().as_deref(), Some("data: héllo\n"));
    }

    #[test]
    fn test_buffered_len_tracks_pending_bytes() {
        let mut framer = EventFramer::new();
        framer.push(b"data: x\n");
        assert_eq!(framer.next_event(), None);
        assert_eq!(framer.buffered_len(), 8);
        framer.push(b"\n");
        framer.next_event();
        assert_eq!(framer.buffered_len(), 0);
    }
}
