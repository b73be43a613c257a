//! Shared fixtures for integration tests.
//!
//! Every test gets its own [`MockServer`]; clients are pointed at it with a
//! short timeout so hung requests fail fast.

#![allow(dead_code)]

use std::time::Duration;

use tabby_client::{Client, ClientBuilder};
use wiremock::{MockServer, ResponseTemplate};

/// Builder preconfigured for `server`.
pub fn builder_for(server: &MockServer) -> ClientBuilder {
    Client::builder()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(5))
}

/// Client without credentials or retries, pointed at `server`.
pub fn client_for(server: &MockServer) -> Client {
    builder_for(server).build().expect("client should build")
}

/// Encode `payloads` as SSE `data:` events, optionally followed by `[DONE]`.
pub fn sse_body(payloads: &[serde_json::Value], done: bool) -> String {
    let mut body = String::new();
    for payload in payloads {
        body.push_str("data: ");
        body.push_str(&payload.to_string());
        body.push_str("\n\n");
    }
    if done {
        body.push_str("data: [DONE]\n\n");
    }
    body
}

/// 200 response carrying `body` as an event stream.
pub fn sse_response(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into().into_bytes(), "text/event-stream")
}

/// Chunk of a streamed completion.
pub fn completion_chunk(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "cmpl-1",
        "object": "text_completion",
        "created": 1700000000,
        "model": "test-model",
        "choices": [{ "text": text, "index": 0, "finish_reason": null }]
    })
}

/// Chunk of a streamed chat completion.
pub fn chat_chunk(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion.chunk",
        "created": 1700000000,
        "model": "test-model",
        "choices": [{ "index": 0, "delta": { "content": content }, "finish_reason": null }]
    })
}
