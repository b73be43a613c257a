//! Per-resource API services.
//!
//! Each service borrows the [`Client`](crate::Client) and maps one method to one
//! endpoint. Non-streaming calls go through the client's retry policy;
//! streaming calls are attempted once.

mod auth;
mod chat;
mod completions;
mod embeddings;
mod health;
mod lora;
mod models;
mod sampling;
mod templates;
mod tokens;

pub use auth::AuthService;
pub use chat::{ChatCompletionStream, ChatService};
pub use completions::{CompletionStream, CompletionsService};
pub use embeddings::EmbeddingsService;
pub use health::HealthService;
pub use lora::LoraService;
pub use models::{ModelLoadStream, ModelsService};
pub use sampling::SamplingService;
pub use templates::TemplatesService;
pub use tokens::TokensService;
