//! Request and response records exchanged with the service.
//!
//! All response types tolerate unknown fields. Field names follow the
//! service's camelCase wire format through serde renames.

pub mod annotator;
pub mod cartridge;
pub mod container;
pub mod flow;
pub mod profile;
pub mod status;

use serde::{Deserialize, Serialize};

pub use annotator::AnnotatorDescriptor;
pub use cartridge::{AcdCartridge, CartridgeList};
pub use container::{
    AnalyzeRequest, AnalyzeResponse, AttributeValue, Concept, ContainerAnnotation, Span,
    SymptomDisease, UnstructuredContainer,
};
pub use flow::{AcdFlow, Annotator, AnnotatorFlow, ConfigurationEntity, Flow, FlowEntry};
pub use profile::AcdProfile;
pub use status::{SERVICE_STATE_OK, ServiceStatus};

/// Status message returned by write operations and inside cartridge
/// artifact reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl ServiceMessage {
    pub fn is_error(&self) -> bool {
        self.level
            .as_deref()
            .is_some_and(|l| l.eq_ignore_ascii_case("error"))
    }
}
