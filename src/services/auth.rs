use crate::client::Client;
use crate::error::TabbyResult;
use crate::models::AuthPermissionResponse;

#[derive(Debug, Clone, Copy)]
pub struct AuthService<'a> {
    client: &'a Client,
}

impl<'a> AuthService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Access level granted to the configured credential.
    pub async fn permission(&self) -> TabbyResult<AuthPermissionResponse> {
        let rest = self.client.rest();
        self.client
            .call("get auth permission", move || rest.get("v1/auth/permission", &[]))
            .await
    }
}
