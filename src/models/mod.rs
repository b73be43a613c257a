//! Request and response types for the TabbyAPI endpoints.
//!
//! Optional request fields are omitted from the JSON body when unset. Response
//! fields default when the server leaves them out.

mod chat;
mod common;
mod completion;
mod embeddings;
mod health;
mod lora;
mod model;
mod permission;
mod sampling;
mod template;
mod token;

pub use chat::{
    ChatCompletionChoice, ChatCompletionRequest, ChatCompletionResponse, ChatCompletionStreamChoice,
    ChatCompletionStreamResponse, ChatContent, ChatContentPart, ChatDelta, ChatImageUrl,
    ChatMessage, ChatMessageRole,
};
pub use common::{StringOrList, Usage};
pub use completion::{
    CompletionChoice, CompletionLogProbs, CompletionRequest, CompletionResponse,
    CompletionStreamChoice, CompletionStreamResponse,
};
pub use embeddings::{
    Embedding, EmbeddingObject, EmbeddingsRequest, EmbeddingsResponse, EmbeddingsUsage,
};
pub use health::{HealthCheckResponse, UnhealthyEvent};
pub use lora::{LoraCard, LoraList, LoraLoadInfo, LoraLoadRequest, LoraLoadResponse};
pub use model::{
    DownloadRequest, DownloadResponse, EmbeddingModelLoadRequest, ModelCard, ModelCardParameters,
    ModelDefaultGenerationSettings, ModelList, ModelLoadRequest, ModelLoadResponse,
    ModelPropsResponse, RopeAlpha,
};
pub use permission::AuthPermissionResponse;
pub use sampling::{SamplerOverrideListResponse, SamplerOverrideSwitchRequest};
pub use template::{TemplateList, TemplateSwitchRequest};
pub use token::{
    TokenDecodeRequest, TokenDecodeResponse, TokenEncodeInput, TokenEncodeRequest,
    TokenEncodeResponse,
};
