use crate::client::Client;
use crate::error::TabbyResult;
use crate::models::HealthCheckResponse;

#[derive(Debug, Clone, Copy)]
pub struct HealthService<'a> {
    client: &'a Client,
}

impl<'a> HealthService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Server health and any recorded issues.
    pub async fn check(&self) -> TabbyResult<HealthCheckResponse> {
        let rest = self.client.rest();
        self.client
            .call("health check", move || rest.get("v1/health", &[]))
            .await
    }
}
