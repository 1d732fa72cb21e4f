use serde::{Deserialize, Serialize};

pub const SERVICE_STATE_OK: &str = "OK";

/// Body of `GET /v1/status/health_check`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    #[serde(default)]
    pub service_state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_memory_mb: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commited_memory_mb: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_use_memory_mb: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_processors: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrent_requests: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_requests: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rejected_requests: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_blocked_requests: Option<i64>,
}

impl ServiceStatus {
    pub fn is_ok(&self) -> bool {
        self.service_state == SERVICE_STATE_OK
    }
}
