//! Tests against a running ACD service
//!
//! These tests make real HTTP calls. Configure the target with `ACD_URL`
//! plus the usual `ACD_*` variables (`ACD_AUTH_TYPE`, `ACD_BEARER_TOKEN`, ...).
//! Cartridge deployment additionally needs `ACD_TEST_CARTRIDGE` pointing at
//! an archive.
//!
//! To run these tests:
//!   ACD_URL=https://... cargo test --package acd-client --test live_service_tests -- --nocapture
//!
//! If `ACD_URL` is not set, tests will be skipped (not failed). Any other
//! configuration problem fails them.

mod common;

use acd_client::{
    AcdConfig, AcdError,
    client::{
        AnalyzeOptions, AnalyzeWithFlowOptions, CreateFlowOptions, CreateProfileOptions,
        DeleteFlowOptions, DeleteProfileOptions, DeployCartridgeOptions, DeployOutcome,
        GetFlowOptions, GetProfileOptions, UpdateProfileOptions,
    },
    models::Span,
};
use common::*;

/// Helper to skip tests when no service is configured
macro_rules! require_live_service {
    () => {
        match live_client().await {
            Some(client) => client,
            None => {
                eprintln!("SKIPPED: ACD_URL not set");
                return;
            }
        }
    };
}

const STANDARD_FLOW: &str = "wh_acd.ibm_clinical_insights_v1.0_standard_flow";

#[tokio::test]
async fn test_health_check() {
    let client = require_live_service!();
    let status = client.health_check(&Default::default()).await.unwrap().into_result().unwrap();
    assert!(status.is_ok(), "service state: {}", status.service_state);
}

#[tokio::test]
async fn test_catalogue_endpoints() {
    let client = require_live_service!();

    let annotators = client.list_annotators(&Default::default()).await.unwrap();
    assert_eq!(annotators.status, 200);
    assert!(!annotators.result.unwrap_or_default().is_empty());

    assert_eq!(client.list_profiles(&Default::default()).await.unwrap().status, 200);
    assert_eq!(client.list_flows(&Default::default()).await.unwrap().status, 200);
    assert_eq!(client.list_cartridges(&Default::default()).await.unwrap().status, 200);
}

#[tokio::test]
async fn test_profile_crud() {
    let client = require_live_service!();
    let profile_id = unique_id("rust_client_profile");

    let created = client
        .create_profile(&CreateProfileOptions::new(sample_profile(&profile_id)))
        .await
        .unwrap();
    assert!(created.is_success());

    let fetched = client
        .get_profile(&GetProfileOptions::new(&profile_id))
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(fetched.id.as_deref(), Some(profile_id.as_str()));

    let mut changed = sample_profile(&profile_id);
    changed.description = Some("Updated by live tests".to_string());
    client
        .update_profile(&UpdateProfileOptions::new(&profile_id, changed))
        .await
        .unwrap();

    client
        .delete_profile(&DeleteProfileOptions::new(&profile_id))
        .await
        .unwrap();

    let err = client
        .get_profile(&GetProfileOptions::new(&profile_id))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_flow_crud() {
    let client = require_live_service!();
    let flow_id = unique_id("rust_client_flow");

    client
        .create_flow(&CreateFlowOptions::new(sample_flow(&flow_id)))
        .await
        .unwrap();

    let fetched = client
        .get_flow(&GetFlowOptions::new(&flow_id))
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(fetched.id.as_deref(), Some(flow_id.as_str()));

    client
        .delete_flow(&DeleteFlowOptions::new(&flow_id))
        .await
        .unwrap();

    let err = client
        .get_flow(&GetFlowOptions::new(&flow_id))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_analyze() {
    let client = require_live_service!();
    let text = "Patient has diabetes and was prescribed metformin.";

    let inline = client
        .analyze(&AnalyzeOptions::new(text, vec![sample_annotator_flow()]))
        .await
        .unwrap()
        .into_result()
        .unwrap();
    let concepts: Vec<_> = inline.concepts().collect();
    assert!(!concepts.is_empty());
    for concept in concepts {
        assert!(concept.cui.is_some(), "concept without cui: {:?}", concept);
        assert!(concept.has_valid_span(), "concept with bad span: {:?}", concept);
    }

    let stored = client
        .analyze_with_flow(&AnalyzeWithFlowOptions::new(STANDARD_FLOW, text))
        .await
        .unwrap();
    assert!(stored.is_success());
}

#[tokio::test]
async fn test_cartridge_deploy() {
    let client = require_live_service!();
    let Ok(archive) = std::env::var("ACD_TEST_CARTRIDGE") else {
        eprintln!("SKIPPED: ACD_TEST_CARTRIDGE not set");
        return;
    };

    match client
        .deploy_cartridge_or_existing(&DeployCartridgeOptions::new(&archive))
        .await
        .unwrap()
    {
        DeployOutcome::Accepted(response) => assert!(response.is_success()),
        DeployOutcome::AlreadyExists { message } => {
            eprintln!("cartridge already deployed: {}", message)
        }
    }

    let updated = client
        .deploy_cartridge(&DeployCartridgeOptions::new(&archive).with_update(true))
        .await
        .unwrap();
    assert!((200..300).contains(&updated.status));
}

#[test]
#[should_panic(expected = "Invalid ACD_* configuration")]
fn test_live_config_error_fails_instead_of_skipping() {
    live_client_from(Err(AcdError::Config("ACD_TIMEOUT_SECS must be a number".to_string())));
}

#[test]
#[should_panic(expected = "Failed to build ACD client")]
fn test_live_incomplete_auth_fails_instead_of_skipping() {
    let mut config = AcdConfig::new("https://acd.example.com/api", "2023-01-01");
    config.auth.kind = acd_client::config::AuthKind::Bearer;
    live_client_from(Ok(config));
}
