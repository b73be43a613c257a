//! Auth permission payload (`v1/auth/permission`).

use serde::{Deserialize, Serialize};

/// Access level of the credential used for the request
/// (`none`, `api` or `admin`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPermissionResponse {
    #[serde(default)]
    pub permission: String,
}

impl AuthPermissionResponse {
    pub fn is_admin(&self) -> bool {
        self.permission == "admin"
    }
}
