//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use stacksense::api::{
    CatalogOrigin, CatalogResponse, ErrorResponse, HealthResponse, ReloadResponse,
    WelcomeResponse,
};
use stacksense_core::{Catalog, CatalogSource};
use std::path::PathBuf;

// =============================================================================
// HEALTH & ROOT
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
    assert_eq!(health.technologies, 0);
}

#[test]
fn test_health_response_serialization() {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: "0.4.2".to_string(),
        technologies: 35,
    };

    let json = serde_json::to_string(&health).unwrap();
    assert!(json.contains("\"status\":\"ok\""));
    assert!(json.contains("\"version\":\"0.4.2\""));
    assert!(json.contains("\"technologies\":35"));
}

#[test]
fn test_health_for_catalog_counts_entries() {
    let catalog = Catalog::from_json_str(
        r#"[{"id": "go", "name": "Go", "category": "Backend", "description": ""}]"#,
    )
    .unwrap();
    assert_eq!(HealthResponse::for_catalog(&catalog).technologies, 1);
}

#[test]
fn test_welcome_message() {
    let json = serde_json::to_string(&WelcomeResponse::default()).unwrap();
    assert_eq!(json, r#"{"message":"Welcome to StackSense API"}"#);
}

// =============================================================================
// CATALOG
// =============================================================================

#[test]
fn test_catalog_origin_from_source() {
    let missing = CatalogOrigin::from(&CatalogSource::Missing(PathBuf::from("kb.json")));
    assert_eq!(missing.kind, "missing");
    assert_eq!(missing.path.as_deref(), Some("kb.json"));

    let inline = CatalogOrigin::from(&CatalogSource::Inline);
    assert_eq!(inline.kind, "inline");
    assert!(inline.path.is_none());
}

#[test]
fn test_catalog_response_round_trip() {
    let catalog = Catalog::from_json_str(
        r#"[{"id": "go", "name": "Go", "category": "Backend", "description": "",
             "tags": ["fast"]}]"#,
    )
    .unwrap();
    let response = CatalogResponse::from_catalog(&catalog);

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"categories\":{\"Backend\":1}"));

    let parsed: CatalogResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.count, 1);
    assert_eq!(parsed.technologies[0].id, "go");
}

#[test]
fn test_reload_response_deserialization() {
    let json = r#"{"reloaded":true,"technologies":3,"fingerprint":"abc","previous_fingerprint":null}"#;
    let reload: ReloadResponse = serde_json::from_str(json).unwrap();

    assert!(reload.reloaded);
    assert_eq!(reload.technologies, 3);
    assert_eq!(reload.fingerprint.as_deref(), Some("abc"));
    assert!(reload.previous_fingerprint.is_none());
}

// =============================================================================
// ERRORS
// =============================================================================

#[test]
fn test_error_response_with_details() {
    let error = ErrorResponse::new("validation_error", "too long").with_details("domain");

    let json = serde_json::to_string(&error).unwrap();
    assert!(json.contains("\"details\":\"domain\""));
}

#[test]
fn test_error_response_without_details() {
    let json = r#"{"error":"bad_request","message":"not json"}"#;
    let error: ErrorResponse = serde_json::from_str(json).unwrap();

    assert_eq!(error.error, "bad_request");
    assert!(error.details.is_none());
}
