//! Tabby Client - An async client for the TabbyAPI inference server
//!
//! Typed access to completions, chat, embeddings, model and adapter
//! management, tokenization, sampler overrides, health and auth endpoints,
//! with Server-Sent Events streaming for generation and model loading.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod prelude;
pub mod rest;
pub mod retry;
pub mod services;
pub mod sse;

pub use auth::{AdminKeyAuth, ApiKeyAuth, Authenticator, BearerTokenAuth, NoAuth};
pub use client::Client;
pub use config::ClientBuilder;
pub use error::{ApiError, ErrorInfo, ErrorKind, RequestError, StreamError, TabbyError, TabbyResult};
pub use retry::{default_retry_policy, RetryPolicy, SimpleRetryPolicy};
pub use services::{ChatCompletionStream, CompletionStream, ModelLoadStream};
pub use sse::Stream;
