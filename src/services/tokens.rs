use crate::client::Client;
use crate::error::TabbyResult;
use crate::models::{
    TokenDecodeRequest, TokenDecodeResponse, TokenEncodeRequest, TokenEncodeResponse,
};

/// Tokenizer of the loaded model.
#[derive(Debug, Clone, Copy)]
pub struct TokensService<'a> {
    client: &'a Client,
}

impl<'a> TokensService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Text (or chat messages) to token ids.
    pub async fn encode(&self, request: &TokenEncodeRequest) -> TabbyResult<TokenEncodeResponse> {
        let rest = self.client.rest();
        self.client
            .call("encode tokens", move || rest.post("v1/tokens/encode", request))
            .await
    }

    /// Token ids back to text.
    pub async fn decode(&self, request: &TokenDecodeRequest) -> TabbyResult<TokenDecodeResponse> {
        let rest = self.client.rest();
        self.client
            .call("decode tokens", move || rest.post("v1/tokens/decode", request))
            .await
    }
}
