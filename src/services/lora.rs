use crate::client::Client;
use crate::error::TabbyResult;
use crate::models::{LoraList, LoraLoadRequest, LoraLoadResponse};

/// LoRA adapter management. Loading and unloading need an admin key.
#[derive(Debug, Clone, Copy)]
pub struct LoraService<'a> {
    client: &'a Client,
}

impl<'a> LoraService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> TabbyResult<LoraList> {
        let rest = self.client.rest();
        self.client
            .call("list loras", move || rest.get("v1/loras", &[]))
            .await
    }

    /// Adapters currently applied to the loaded model.
    pub async fn active(&self) -> TabbyResult<LoraList> {
        let rest = self.client.rest();
        self.client
            .call("get active loras", move || rest.get("v1/loras/active", &[]))
            .await
    }

    pub async fn load(&self, request: &LoraLoadRequest) -> TabbyResult<LoraLoadResponse> {
        let rest = self.client.rest();
        self.client
            .call("load loras", move || rest.post("v1/loras/load", request))
            .await
    }

    /// Unload every active adapter.
    pub async fn unload(&self) -> TabbyResult<()> {
        let rest = self.client.rest();
        self.client
            .call("unload loras", move || rest.delete("v1/loras/active", &[]))
            .await
    }
}
