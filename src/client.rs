//! Entry point for talking to a TabbyAPI server.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::config::ClientBuilder;
use crate::error::TabbyResult;
use crate::rest::RestClient;
use crate::retry::{with_retry, RetryPolicy};
use crate::services::{
    AuthService, ChatService, CompletionsService, EmbeddingsService, HealthService, LoraService,
    ModelsService, SamplingService, TemplatesService, TokensService,
};
use crate::sse::Stream;

/// TabbyAPI client.
///
/// Cheap to clone; clones share the connection pool and the cancellation
/// scope. Every stream opened by the client is bound to a child of the
/// client's token, so [`Client::close`] ends all of them.
///
/// # Example
///
/// ```ignore
/// use tabby_client::{Client, models::CompletionRequest};
///
/// let client = Client::builder().with_api_key("key").build()?;
/// let response = client
///     .completions()
///     .create(&CompletionRequest::new("Hello"))
///     .await?;
/// println!("{}", response.choices[0].text);
/// ```
#[derive(Clone)]
pub struct Client {
    rest: RestClient,
    retry_policy: Option<Arc<dyn RetryPolicy>>,
    cancel: CancellationToken,
}

impl Client {
    /// Client with default settings (`http://localhost:8080`, 30s, no credentials).
    pub fn new() -> TabbyResult<Self> {
        ClientBuilder::new().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Client configured from `TABBY_API_ENDPOINT`, `TABBY_API_KEY` and `TABBY_ADMIN_KEY`.
    pub fn from_env() -> TabbyResult<Self> {
        ClientBuilder::from_env().build()
    }

    pub(crate) fn from_parts(
        rest: RestClient,
        retry_policy: Option<Arc<dyn RetryPolicy>>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            rest,
            retry_policy,
            cancel,
        }
    }

    /// The underlying transport, for endpoints without a dedicated service.
    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Root token of the client's streams.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancel every stream opened by this client (and its clones).
    ///
    /// Non-streaming calls are unaffected; drop their futures to cancel them.
    pub fn close(&self) {
        tracing::debug!("closing TabbyAPI client");
        self.cancel.cancel();
    }

    pub fn completions(&self) -> CompletionsService<'_> {
        CompletionsService::new(self)
    }

    pub fn chat(&self) -> ChatService<'_> {
        ChatService::new(self)
    }

    pub fn embeddings(&self) -> EmbeddingsService<'_> {
        EmbeddingsService::new(self)
    }

    pub fn models(&self) -> ModelsService<'_> {
        ModelsService::new(self)
    }

    pub fn lora(&self) -> LoraService<'_> {
        LoraService::new(self)
    }

    pub fn templates(&self) -> TemplatesService<'_> {
        TemplatesService::new(self)
    }

    pub fn tokens(&self) -> TokensService<'_> {
        TokensService::new(self)
    }

    pub fn sampling(&self) -> SamplingService<'_> {
        SamplingService::new(self)
    }

    pub fn health(&self) -> HealthService<'_> {
        HealthService::new(self)
    }

    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    /// Run a non-streaming call under the retry policy, if one is configured.
    pub(crate) async fn call<T, F, Fut>(&self, operation: &str, mut op: F) -> TabbyResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = TabbyResult<T>>,
    {
        match self.retry_policy.as_deref() {
            Some(policy) => with_retry(policy, operation, op).await,
            None => op().await,
        }
    }

    /// POST `body` to `endpoint` and wrap the open response in a stream.
    pub(crate) async fn open_stream<B, T>(&self, endpoint: &str, body: &B) -> TabbyResult<Stream<T>>
    where
        B: Serialize + ?Sized,
    {
        let url = self.rest.build_url(endpoint, &[]);
        let response = self.rest.do_raw(Method::POST, &url, Some(body)).await?;
        tracing::debug!("opened SSE stream from {}", url);
        Ok(Stream::from_response(response, self.cancel.child_token()))
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("rest", &self.rest)
            .field("retry_policy", &self.retry_policy.is_some())
            .field("closed", &self.cancel.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_client() {
        let client = Client::new().unwrap();
        assert_eq!(client.rest().base_url(), "http://localhost:8080");
        assert!(client.retry_policy.is_none());
    }

    #[test]
    fn test_clones_share_cancellation_scope() {
        let client = Client::new().unwrap();
        let clone = client.clone();
        client.close();
        assert!(clone.cancellation_token().is_cancelled());
    }

    #[test]
    fn test_external_root_token() {
        let root = CancellationToken::new();
        let client = Client::builder()
            .with_cancellation_token(root.child_token())
            .build()
            .unwrap();
        root.cancel();
        assert!(client.cancellation_token().is_cancelled());
    }
}
