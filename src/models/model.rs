//! Model management payloads (`v1/models/...`).

use serde::{Deserialize, Serialize};

/// Description of a model known to the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelCard {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub owned_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ModelCardParameters>,
}

/// Load-time parameters reported for a loaded model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelCardParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_seq_len: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rope_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rope_alpha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_batch_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_vision: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub data: Vec<ModelCard>,
}

/// RoPE alpha: a fixed factor, or `"auto"` to let the server pick one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RopeAlpha {
    Value(f64),
    Named(String),
}

impl RopeAlpha {
    pub fn auto() -> Self {
        RopeAlpha::Named("auto".to_string())
    }
}

impl From<f64> for RopeAlpha {
    fn from(value: f64) -> Self {
        RopeAlpha::Value(value)
    }
}

/// Request body for loading a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelLoadRequest {
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_seq_len: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rope_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rope_alpha: Option<RopeAlpha>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_split: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<String>,
}

impl ModelLoadRequest {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Default::default()
        }
    }
}

/// Model load result, also streamed as progress updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelLoadResponse {
    #[serde(default)]
    pub model_type: String,
    /// Modules loaded so far
    #[serde(default)]
    pub module: u32,
    /// Total modules to load
    #[serde(default)]
    pub modules: u32,
    /// `processing` while loading, `finished` at the end
    #[serde(default)]
    pub status: String,
}

impl ModelLoadResponse {
    pub fn is_finished(&self) -> bool {
        self.status == "finished"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelPropsResponse {
    #[serde(default)]
    pub total_slots: u32,
    #[serde(default)]
    pub chat_template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_generation_settings: Option<ModelDefaultGenerationSettings>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDefaultGenerationSettings {
    #[serde(default)]
    pub n_ctx: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingModelLoadRequest {
    pub embedding_model_name: String,
    /// Device to run the embedding model on (`cpu`, `cuda`, `auto`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeddings_device: Option<String>,
}

impl EmbeddingModelLoadRequest {
    pub fn new(embedding_model_name: impl Into<String>) -> Self {
        Self {
            embedding_model_name: embedding_model_name.into(),
            embeddings_device: None,
        }
    }
}

/// Request to download a model repository from the Hugging Face hub.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub repo_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Hub access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

impl DownloadRequest {
    pub fn new(repo_id: impl Into<String>) -> Self {
        Self {
            repo_id: repo_id.into(),
            ..Default::default()
        }
    }
}

impl std::fmt::Debug for DownloadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadRequest")
            .field("repo_id", &self.repo_id)
            .field("repo_type", &self.repo_type)
            .field("folder_name", &self.folder_name)
            .field("revision", &self.revision)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadResponse {
    #[serde(default)]
    pub download_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rope_alpha_forms() {
        let auto = ModelLoadRequest {
            rope_alpha: Some(RopeAlpha::auto()),
            ..ModelLoadRequest::new("m")
        };
        assert_eq!(serde_json::to_value(&auto).unwrap()["rope_alpha"], json!("auto"));

        let fixed = ModelLoadRequest {
            rope_alpha: Some(RopeAlpha::from(2.5)),
            ..ModelLoadRequest::new("m")
        };
        assert_eq!(serde_json::to_value(&fixed).unwrap()["rope_alpha"], json!(2.5));
    }

    #[test]
    fn test_load_request_minimal_body() {
        let value = serde_json::to_value(ModelLoadRequest::new("Llama-3-8B")).unwrap();
        assert_eq!(value, json!({"model_name": "Llama-3-8B"}));
    }

    #[test]
    fn test_load_progress() {
        let json = r#"{"model_type":"model","module":3,"modules":10,"status":"processing"}"#;
        let progress: ModelLoadResponse = serde_json::from_str(json).unwrap();
        assert!(!progress.is_finished());
        assert_eq!(progress.module, 3);
    }

    #[test]
    fn test_download_request_debug_redacts_token() {
        let request = DownloadRequest {
            token: Some("hf_secret".to_string()),
            ..DownloadRequest::new("org/model")
        };
        let debug = format!("{:?}", request);
        assert!(!debug.contains("hf_secret"));
        assert!(debug.contains("org/model"));
    }
}
