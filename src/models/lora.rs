//! LoRA adapter payloads (`v1/loras/...`).

use serde::{Deserialize, Serialize};

use super::common::is_false;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoraCard {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub owned_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoraList {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub data: Vec<LoraCard>,
}

/// One adapter to load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoraLoadInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling: Option<f64>,
}

impl LoraLoadInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scaling: None,
        }
    }

    pub fn with_scaling(mut self, scaling: f64) -> Self {
        self.scaling = Some(scaling);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoraLoadRequest {
    pub loras: Vec<LoraLoadInfo>,
    /// Load immediately instead of waiting for queued generations
    #[serde(default, skip_serializing_if = "is_false")]
    pub skip_queue: bool,
}

/// Names of adapters that loaded and that failed to load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoraLoadResponse {
    #[serde(default)]
    pub success: Vec<String>,
    #[serde(default)]
    pub failure: Vec<String>,
}
