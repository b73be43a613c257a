//! Health check payload (`v1/health`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// `healthy` or `unhealthy`
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<UnhealthyEvent>,
}

impl HealthCheckResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// A problem the server recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnhealthyEvent {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub description: String,
}
