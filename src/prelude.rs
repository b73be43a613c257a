//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```ignore
//! use tabby_client::prelude::*;
//! ```
//!
//! This will import:
//! - The client and its builder
//! - Error types and the `ErrorInfo` trait
//! - Request/response types for generation
//! - Stream aliases

pub use crate::client::Client;
pub use crate::config::ClientBuilder;

pub use crate::error::{ErrorInfo, ErrorKind, TabbyError, TabbyResult};

pub use crate::models::{
    ChatCompletionRequest, ChatMessage, ChatMessageRole, CompletionRequest, EmbeddingsRequest,
    ModelLoadRequest,
};

pub use crate::retry::{default_retry_policy, RetryPolicy};

pub use crate::services::{ChatCompletionStream, CompletionStream, ModelLoadStream};
