//! Text completions.

use crate::client::Client;
use crate::error::TabbyResult;
use crate::models::{CompletionRequest, CompletionResponse, CompletionStreamResponse};
use crate::sse::Stream;

const COMPLETIONS: &str = "v1/completions";

/// Stream of incremental completion chunks.
pub type CompletionStream = Stream<CompletionStreamResponse>;

/// Generates text from a prompt.
#[derive(Debug, Clone, Copy)]
pub struct CompletionsService<'a> {
    client: &'a Client,
}

impl<'a> CompletionsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Generate a complete response. `stream` is forced off.
    pub async fn create(&self, request: &CompletionRequest) -> TabbyResult<CompletionResponse> {
        let body = CompletionRequest {
            stream: false,
            ..request.clone()
        };
        let (rest, body) = (self.client.rest(), &body);
        self.client
            .call("create completion", move || rest.post(COMPLETIONS, body))
            .await
    }

    /// Generate tokens incrementally. `stream` is forced on.
    pub async fn create_stream(
        &self,
        request: &CompletionRequest,
    ) -> TabbyResult<CompletionStream> {
        let body = CompletionRequest {
            stream: true,
            ..request.clone()
        };
        self.client.open_stream(COMPLETIONS, &body).await
    }
}
