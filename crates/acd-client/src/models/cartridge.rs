use serde::{Deserialize, Serialize};

use super::ServiceMessage;

/// Deployment record of an uploaded cartridge.
///
/// Deployment is asynchronous on the service side: an upload is accepted with
/// 202 and the record's `status` moves from `processing` to `completed` or
/// `failed`, which callers observe by polling [`crate::AcdClient::get_cartridge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcdCartridge {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_response_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifact_response: Vec<ServiceMessage>,
}

impl AcdCartridge {
    pub fn is_processing(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("processing"))
    }

    /// Artifact entries the service reported at `ERROR` level.
    pub fn failed_artifacts(&self) -> impl Iterator<Item = &ServiceMessage> {
        self.artifact_response.iter().filter(|m| m.is_error())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartridgeList {
    #[serde(default)]
    pub cartridges: Vec<AcdCartridge>,
}
