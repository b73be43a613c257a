//! Tokenizer payloads (`v1/tokens/...`).

use serde::{Deserialize, Serialize};

use super::chat::ChatMessage;
use super::common::is_false;

/// Text to tokenize: a raw string, or chat messages rendered through the
/// active prompt template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenEncodeInput {
    Text(String),
    Messages(Vec<ChatMessage>),
}

impl Default for TokenEncodeInput {
    fn default() -> Self {
        TokenEncodeInput::Text(String::new())
    }
}

impl From<&str> for TokenEncodeInput {
    fn from(value: &str) -> Self {
        TokenEncodeInput::Text(value.to_string())
    }
}

impl From<String> for TokenEncodeInput {
    fn from(value: String) -> Self {
        TokenEncodeInput::Text(value)
    }
}

impl From<Vec<ChatMessage>> for TokenEncodeInput {
    fn from(messages: Vec<ChatMessage>) -> Self {
        TokenEncodeInput::Messages(messages)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenEncodeRequest {
    pub text: TokenEncodeInput,
    #[serde(default, skip_serializing_if = "is_false")]
    pub add_bos_token: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub encode_special_tokens: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub decode_special_tokens: bool,
}

impl TokenEncodeRequest {
    pub fn new(text: impl Into<TokenEncodeInput>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEncodeResponse {
    #[serde(default)]
    pub tokens: Vec<u32>,
    #[serde(default)]
    pub length: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDecodeRequest {
    pub tokens: Vec<u32>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub add_bos_token: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub encode_special_tokens: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub decode_special_tokens: bool,
}

impl TokenDecodeRequest {
    pub fn new(tokens: Vec<u32>) -> Self {
        Self {
            tokens,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDecodeResponse {
    #[serde(default)]
    pub text: String,
}
