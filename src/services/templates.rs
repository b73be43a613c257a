use serde::de::IgnoredAny;

use crate::client::Client;
use crate::error::TabbyResult;
use crate::models::{TemplateList, TemplateSwitchRequest};

/// Prompt template management.
#[derive(Debug, Clone, Copy)]
pub struct TemplatesService<'a> {
    client: &'a Client,
}

impl<'a> TemplatesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> TabbyResult<TemplateList> {
        let rest = self.client.rest();
        self.client
            .call("list templates", move || rest.get("v1/templates", &[]))
            .await
    }

    /// Make `request.prompt_template_name` the active template.
    pub async fn switch(&self, request: &TemplateSwitchRequest) -> TabbyResult<()> {
        let rest = self.client.rest();
        self.client
            .call("switch template", move || {
                rest.post::<_, IgnoredAny>("v1/templates/switch", request)
            })
            .await
            .map(|_| ())
    }

    /// Drop the active template and fall back to the model's default.
    pub async fn unload(&self) -> TabbyResult<()> {
        let rest = self.client.rest();
        self.client
            .call("unload template", move || rest.delete("v1/templates/active", &[]))
            .await
    }
}
