//! Sampler override payloads (`v1/sampler/overrides/...`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Active overrides plus the presets available on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplerOverrideListResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_preset: Option<String>,
    #[serde(default)]
    pub overrides: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub presets: Vec<String>,
}

/// Select a named preset, or set individual overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplerOverrideSwitchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<HashMap<String, serde_json::Value>>,
}

impl SamplerOverrideSwitchRequest {
    pub fn preset(name: impl Into<String>) -> Self {
        Self {
            preset: Some(name.into()),
            overrides: None,
        }
    }

    pub fn overrides(overrides: HashMap<String, serde_json::Value>) -> Self {
        Self {
            preset: None,
            overrides: Some(overrides),
        }
    }
}
