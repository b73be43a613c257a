use crate::client::Client;
use crate::error::TabbyResult;
use crate::models::{EmbeddingsRequest, EmbeddingsResponse};

/// Vector embeddings. An embedding model must be loaded on the server.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddingsService<'a> {
    client: &'a Client,
}

impl<'a> EmbeddingsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &EmbeddingsRequest) -> TabbyResult<EmbeddingsResponse> {
        let rest = self.client.rest();
        self.client
            .call("create embeddings", move || rest.post("v1/embeddings", request))
            .await
    }
}
