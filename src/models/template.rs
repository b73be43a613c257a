//! Prompt template payloads (`v1/templates/...`).

use serde::{Deserialize, Serialize};

/// Names of the prompt templates available on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateList {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub data: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSwitchRequest {
    pub prompt_template_name: String,
}

impl TemplateSwitchRequest {
    pub fn new(prompt_template_name: impl Into<String>) -> Self {
        Self {
            prompt_template_name: prompt_template_name.into(),
        }
    }
}
