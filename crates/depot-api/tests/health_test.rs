//! Health, documentation and middleware integration tests.

mod helpers;

use helpers::doubles::UnavailableStore;
use helpers::{setup_test_app, setup_test_app_with, test_signer};
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app();
    let response = app.client().get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_reflects_record_store() {
    let app = setup_test_app();
    let response = app.client().get("/health/ready").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["record_store"], "healthy");
    assert_eq!(body["backend"], "memory");

    let app = setup_test_app_with(Arc::new(UnavailableStore), test_signer());
    let response = app.client().get("/health/ready").await;
    assert_eq!(response.status_code(), 503);
    let body: Value = response.json();
    assert_eq!(body["status"], "not_ready");
}

#[tokio::test]
async fn test_openapi_lists_asset_paths() {
    let app = setup_test_app();
    let response = app.client().get("/api/openapi.json").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["paths"]["/asset"]["post"].is_object());
    assert!(body["paths"]["/asset/{id}"]["get"].is_object());
    assert!(body["paths"]["/asset/{id}"]["put"].is_object());
}

#[tokio::test]
async fn test_request_id_and_security_headers() {
    let app = setup_test_app();

    let response = app
        .client()
        .get("/health")
        .add_header("X-Request-ID", "upstream-42")
        .await;
    assert_eq!(response.header("x-request-id"), "upstream-42");
    assert_eq!(response.header("x-content-type-options"), "nosniff");
    assert_eq!(response.header("cache-control"), "no-store");

    let response = app.client().get("/health").await;
    assert!(!response.header("x-request-id").is_empty());
}
