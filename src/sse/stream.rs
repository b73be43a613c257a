//! Typed, cancellable cursor over an SSE response body.

use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::event::{parse_event, Event};
use super::framer::EventFramer;
use crate::error::{BoxError, StreamError, TabbyError, TabbyResult};

/// Boxed body of a streaming response.
pub type ByteStream = Pin<Box<dyn futures::Stream<Item = Result<Bytes, BoxError>> + Send>>;

struct Inner {
    body: Option<ByteStream>,
    framer: EventFramer,
    /// End of input or `[DONE]` seen
    finished: bool,
}

/// A single-consumer stream of `T` decoded from SSE `data:` payloads.
///
/// `recv` returns `Ok(None)` at end of stream. Reaching the end does not
/// close the stream; call [`Stream::close`] (or drop it) to release the body.
/// Once closed, every `recv` fails with the stream-closed error.
///
/// Calls to `recv` are serialized internally, but a stream is meant to be
/// consumed by one task.
///
/// # Example
///
/// ```ignore
/// let stream = client.completions().create_stream(request).await?;
/// while let Some(chunk) = stream.recv().await? {
///     print!("{}", chunk.choices[0].text);
/// }
/// stream.close().await?;
/// ```
pub struct Stream<T> {
    inner: Mutex<Inner>,
    closed: AtomicBool,
    cancel: CancellationToken,
    _item: PhantomData<fn() -> T>,
}

impl<T> Stream<T> {
    /// Wrap an open streaming response. The response status must already be checked.
    pub fn from_response(response: reqwest::Response, cancel: CancellationToken) -> Self {
        Self::from_byte_stream(response.bytes_stream(), cancel)
    }

    /// Wrap any chunked byte source.
    pub fn from_byte_stream<S, E>(body: S, cancel: CancellationToken) -> Self
    where
        S: futures::Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        let body: ByteStream = Box::pin(body.map(|chunk| chunk.map_err(Into::into)));
        Self {
            inner: Mutex::new(Inner {
                body: Some(body),
                framer: EventFramer::new(),
                finished: false,
            }),
            closed: AtomicBool::new(false),
            cancel,
            _item: PhantomData,
        }
    }

    /// Receive the next raw event without decoding its payload.
    ///
    /// `[DONE]` is returned once, after which the stream is at its end.
    pub async fn recv_event(&self) -> TabbyResult<Option<Event>> {
        let mut guard = self.inner.lock().await;
        self.check_open()?;
        self.next_event(&mut guard).await
    }

    /// Close the stream and release the response body.
    ///
    /// Idempotent. Cancels the stream's token first so an in-flight `recv`
    /// returns promptly instead of holding the lock.
    pub async fn close(&self) -> TabbyResult<()> {
        self.cancel.cancel();
        let mut guard = self.inner.lock().await;
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        guard.body = None;
        guard.finished = true;
        tracing::debug!("SSE stream closed");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Token bounding this stream's lifetime. Cancelling it makes the next
    /// (or in-flight) `recv` fail with the cancelled error.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn check_open(&self) -> TabbyResult<()> {
        if self.is_closed() {
            return Err(StreamError::closed().into());
        }
        if self.cancel.is_cancelled() {
            return Err(TabbyError::cancelled());
        }
        Ok(())
    }

    async fn next_event(&self, inner: &mut Inner) -> TabbyResult<Option<Event>> {
        loop {
            if inner.finished {
                return Ok(None);
            }
            if let Some(block) = inner.framer.next_event() {
                let event = self.parsed(&block);
                if event.is_done() {
                    Self::finish(inner);
                }
                return Ok(Some(event));
            }

            let Some(body) = inner.body.as_mut() else {
                return Ok(None);
            };
            let chunk = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(TabbyError::cancelled()),
                chunk = body.next() => chunk,
            };

            match chunk {
                Some(Ok(bytes)) => inner.framer.push(&bytes),
                Some(Err(err)) => {
                    return Err(StreamError::with_source("error reading from stream", err).into())
                }
                None => {
                    let last = inner.framer.finish().map(|block| self.parsed(&block));
                    Self::finish(inner);
                    return Ok(last);
                }
            }
        }
    }

    /// Mark end of stream and drop anything still buffered.
    fn finish(inner: &mut Inner) {
        inner.finished = true;
        inner.body = None;
        inner.framer = EventFramer::new();
    }

    fn parsed(&self, block: &str) -> Event {
        let event = parse_event(block);
        tracing::debug!(
            "SSE event received: type={} id={:?} ({} bytes of data)",
            event.event,
            event.id,
            event.data.len()
        );
        event
    }
}

impl<T: DeserializeOwned> Stream<T> {
    /// Receive and decode the next item.
    ///
    /// Returns `Ok(None)` at end of stream or after `[DONE]`. Events without
    /// a data payload (keep-alives) are skipped. A payload that fails to decode
    /// yields an error for this call only; later events are still readable.
    pub async fn recv(&self) -> TabbyResult<Option<T>> {
        let mut guard = self.inner.lock().await;
        self.check_open()?;

        loop {
            let Some(event) = self.next_event(&mut guard).await? else {
                return Ok(None);
            };
            if event.is_done() {
                return Ok(None);
            }
            if event.data.is_empty() {
                tracing::trace!("skipping SSE event without data (type={})", event.event);
                continue;
            }
            return event.decode().map(Some);
        }
    }

    /// Adapt into a [`futures::Stream`] of items.
    ///
    /// The adapter ends at end of stream, or right after yielding the first error.
    pub fn into_items(self) -> impl futures::Stream<Item = TabbyResult<T>> + Send
    where
        T: Send + 'static,
    {
        futures::stream::unfold(Some(self), |state| async move {
            let stream = state?;
            match stream.recv().await {
                Ok(Some(item)) => Some((Ok(item), Some(stream))),
                Ok(None) => None,
                Err(err) => Some((Err(err), None)),
            }
        })
    }
}

impl<T> Drop for Stream<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl<T> std::fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("closed", &self.is_closed())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}
