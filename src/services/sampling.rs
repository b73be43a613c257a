use serde::de::IgnoredAny;

use crate::client::Client;
use crate::error::TabbyResult;
use crate::models::{SamplerOverrideListResponse, SamplerOverrideSwitchRequest};

/// Server-wide sampler overrides.
#[derive(Debug, Clone, Copy)]
pub struct SamplingService<'a> {
    client: &'a Client,
}

impl<'a> SamplingService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Active overrides and available presets.
    pub async fn list_overrides(&self) -> TabbyResult<SamplerOverrideListResponse> {
        let rest = self.client.rest();
        self.client
            .call("list sampler overrides", move || rest.get("v1/sampler/overrides", &[]))
            .await
    }

    pub async fn switch_override(&self, request: &SamplerOverrideSwitchRequest) -> TabbyResult<()> {
        let rest = self.client.rest();
        self.client
            .call("switch sampler override", move || {
                rest.post::<_, IgnoredAny>("v1/sampler/overrides/switch", request)
            })
            .await
            .map(|_| ())
    }

    pub async fn unload_override(&self) -> TabbyResult<()> {
        let rest = self.client.rest();
        self.client
            .call("unload sampler override", move || {
                rest.delete("v1/sampler/overrides/active", &[])
            })
            .await
    }
}
