//! Chat completions.

use crate::client::Client;
use crate::error::TabbyResult;
use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatCompletionStreamResponse};
use crate::sse::Stream;

const CHAT_COMPLETIONS: &str = "v1/chat/completions";

/// Stream of incremental chat completion chunks.
pub type ChatCompletionStream = Stream<ChatCompletionStreamResponse>;

/// Multi-turn chat completions.
#[derive(Debug, Clone, Copy)]
pub struct ChatService<'a> {
    client: &'a Client,
}

impl<'a> ChatService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Generate a complete reply. `stream` is forced off.
    pub async fn create(
        &self,
        request: &ChatCompletionRequest,
    ) -> TabbyResult<ChatCompletionResponse> {
        let body = ChatCompletionRequest {
            stream: false,
            ..request.clone()
        };
        let (rest, body) = (self.client.rest(), &body);
        self.client
            .call("create chat completion", move || rest.post(CHAT_COMPLETIONS, body))
            .await
    }

    /// Generate a reply incrementally. `stream` is forced on.
    pub async fn create_stream(
        &self,
        request: &ChatCompletionRequest,
    ) -> TabbyResult<ChatCompletionStream> {
        let body = ChatCompletionRequest {
            stream: true,
            ..request.clone()
        };
        self.client.open_stream(CHAT_COMPLETIONS, &body).await
    }
}
