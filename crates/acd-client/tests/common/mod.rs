//! Common utilities for ACD client integration tests

#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use acd_client::{
    AcdClient, AcdConfig, NoAuthAuthenticator,
    models::{AcdFlow, AcdProfile, Annotator, AnnotatorFlow, Flow},
};
use mockito::Matcher;
use serde_json::{Value, json};

pub const TEST_VERSION: &str = "2023-01-01";

/// Matches the `version` query parameter every call must carry.
pub fn version_query() -> Matcher {
    Matcher::UrlEncoded("version".into(), TEST_VERSION.into())
}

/// Client pointed at a mock server, without credentials.
pub fn mock_client(server: &mockito::ServerGuard) -> AcdClient {
    AcdClient::new(
        &AcdConfig::new(server.url(), TEST_VERSION),
        Arc::new(NoAuthAuthenticator),
    )
    .expect("Failed to create test client")
}

pub fn unique_id(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

pub fn sample_profile(id: &str) -> AcdProfile {
    AcdProfile {
        name: Some("Test profile".to_string()),
        description: Some("Profile created by the integration tests".to_string()),
        version: Some("1.0".to_string()),
        publisher: Some("acd-client tests".to_string()),
        annotators: vec![
            Annotator::new("concept_detection").with_parameter("expanded", "true"),
            Annotator::new("negation"),
        ],
        ..AcdProfile::new(id)
    }
}

pub fn sample_annotator_flow() -> AnnotatorFlow {
    AnnotatorFlow::new(Flow::of_annotators(["concept_detection", "negation"]))
}

pub fn sample_flow(id: &str) -> AcdFlow {
    AcdFlow {
        id: Some(id.to_string()),
        name: Some("Test flow".to_string()),
        description: Some("Flow created by the integration tests".to_string()),
        version: Some("1.0".to_string()),
        annotator_flows: vec![sample_annotator_flow()],
        ..Default::default()
    }
}

pub fn service_message(code: u16, message: &str) -> Value {
    json!({ "code": code, "message": message, "correlationId": "test-correlation" })
}

/// Analyze response with two concepts and one unrecognized annotation type.
pub fn sample_analyze_response(text: &str) -> Value {
    json!({
        "unstructured": [{
            "text": text,
            "data": {
                "concepts": [{
                    "cui": "C0011849",
                    "preferredName": "Diabetes Mellitus",
                    "type": "umls.DiseaseOrSyndrome",
                    "begin": 12,
                    "end": 20,
                    "coveredText": "diabetes",
                    "source": "umls",
                    "sourceVersion": "2022AA"
                }, {
                    "cui": "C0008031",
                    "preferredName": "Chest Pain",
                    "type": "umls.SignOrSymptom",
                    "begin": 33,
                    "end": 43,
                    "coveredText": "chest pain",
                    "source": "umls",
                    "sourceVersion": "2022AA"
                }],
                "spellCorrectedText": [{ "correctedText": text }]
            }
        }]
    })
}

/// Writes a small cartridge archive to `dir` and returns its path.
pub fn write_archive(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"PK cartridge test payload").expect("Failed to write archive");
    path
}

/// Client for a real service, configured from `ACD_*` variables. `None` only
/// when `ACD_URL` is not set; a broken configuration fails the test.
pub async fn live_client() -> Option<AcdClient> {
    std::env::var("ACD_URL").ok()?;
    Some(live_client_from(AcdConfig::load().await))
}

pub fn live_client_from(config: acd_client::Result<AcdConfig>) -> AcdClient {
    let config = config.unwrap_or_else(|e| panic!("Invalid ACD_* configuration: {}", e));
    AcdClient::from_config(&config).unwrap_or_else(|e| panic!("Failed to build ACD client: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_flow_has_annotators() {
        let flow = sample_flow("f1");
        assert_eq!(
            flow.annotator_flows[0].flow.annotator_names(),
            vec!["concept_detection", "negation"]
        );
    }

    #[test]
    fn test_unique_ids_differ() {
        assert_ne!(unique_id("p"), unique_id("p"));
    }
}
