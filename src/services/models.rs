//! Model management.
//!
//! Loading, unloading and downloading need an admin key.

use crate::client::Client;
use crate::error::TabbyResult;
use crate::models::{
    DownloadRequest, DownloadResponse, EmbeddingModelLoadRequest, ModelCard, ModelList,
    ModelLoadRequest, ModelLoadResponse, ModelPropsResponse,
};
use crate::sse::Stream;

const MODEL_LOAD: &str = "v1/models/load";

/// Stream of model loading progress updates.
pub type ModelLoadStream = Stream<ModelLoadResponse>;

#[derive(Debug, Clone, Copy)]
pub struct ModelsService<'a> {
    client: &'a Client,
}

impl<'a> ModelsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// All models available to the server.
    pub async fn list(&self) -> TabbyResult<ModelList> {
        let rest = self.client.rest();
        self.client
            .call("list models", move || rest.get("v1/models", &[]))
            .await
    }

    /// The currently loaded model.
    pub async fn get(&self) -> TabbyResult<ModelCard> {
        let rest = self.client.rest();
        self.client
            .call("get current model", move || rest.get("v1/models/current", &[]))
            .await
    }

    /// Load a model and wait for the final status.
    pub async fn load(&self, request: &ModelLoadRequest) -> TabbyResult<ModelLoadResponse> {
        let rest = self.client.rest();
        self.client
            .call("load model", move || rest.post(MODEL_LOAD, request))
            .await
    }

    /// Load a model and follow its progress module by module.
    pub async fn load_stream(&self, request: &ModelLoadRequest) -> TabbyResult<ModelLoadStream> {
        self.client.open_stream(MODEL_LOAD, request).await
    }

    pub async fn unload(&self) -> TabbyResult<()> {
        let rest = self.client.rest();
        self.client
            .call("unload model", move || rest.delete("v1/models/current", &[]))
            .await
    }

    /// Properties of the loaded model (slots, chat template, context size).
    pub async fn props(&self) -> TabbyResult<ModelPropsResponse> {
        let rest = self.client.rest();
        self.client
            .call("get model props", move || rest.get("v1/models/props", &[]))
            .await
    }

    /// Download a model repository into the server's model directory.
    pub async fn download(&self, request: &DownloadRequest) -> TabbyResult<DownloadResponse> {
        let rest = self.client.rest();
        self.client
            .call("download model", move || rest.post("v1/models/download", request))
            .await
    }

    /// Models usable as draft models for speculative decoding.
    pub async fn list_draft(&self) -> TabbyResult<ModelList> {
        let rest = self.client.rest();
        self.client
            .call("list draft models", move || rest.get("v1/models/draft", &[]))
            .await
    }

    pub async fn list_embedding(&self) -> TabbyResult<ModelList> {
        let rest = self.client.rest();
        self.client
            .call("list embedding models", move || rest.get("v1/models/embedding", &[]))
            .await
    }

    pub async fn get_embedding(&self) -> TabbyResult<ModelCard> {
        let rest = self.client.rest();
        self.client
            .call("get current embedding model", move || {
                rest.get("v1/models/embedding/current", &[])
            })
            .await
    }

    pub async fn load_embedding(
        &self,
        request: &EmbeddingModelLoadRequest,
    ) -> TabbyResult<ModelLoadResponse> {
        let rest = self.client.rest();
        self.client
            .call("load embedding model", move || rest.post("v1/models/embedding/load", request))
            .await
    }

    pub async fn unload_embedding(&self) -> TabbyResult<()> {
        let rest = self.client.rest();
        self.client
            .call("unload embedding model", move || {
                rest.delete("v1/models/embedding/current", &[])
            })
            .await
    }
}
