//! Shared fixtures for the HTTP integration tests.
#![allow(dead_code)]

pub mod doubles;

use axum_test::TestServer;
use depot_api::setup::routes;
use depot_api::state::AppState;
use depot_core::{AssetServiceConfig, BaseConfig, Config, LogFormat, RecordBackend};
use depot_db::{AssetStore, MemoryAssetStore};
use depot_storage::{ObjectSigner, S3Signer};
use std::sync::Arc;

pub const TEST_BUCKET: &str = "test-bucket";

pub fn test_config() -> Config {
    Config(Box::new(AssetServiceConfig {
        base: BaseConfig {
            server_port: 8080,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            request_timeout_secs: 30,
            log_format: LogFormat::Pretty,
        },
        s3_bucket: Some(TEST_BUCKET.to_string()),
        s3_region: Some("us-east-1".to_string()),
        s3_endpoint: None,
        object_key_prefix: None,
        record_backend: RecordBackend::Memory,
        asset_table: "assets".to_string(),
        dynamodb_endpoint: None,
        database_url: None,
        db_max_connections: 1,
        db_timeout_seconds: 1,
        reservation_max_attempts: 11,
        reservation_backoff_base_ms: 0,
        reservation_backoff_max_ms: 0,
    }))
}

/// Real S3 signer with fixed credentials. Signing needs no network.
pub fn test_signer() -> Arc<dyn ObjectSigner> {
    Arc::new(
        S3Signer::with_static_credentials(
            TEST_BUCKET.to_string(),
            "us-east-1".to_string(),
            None,
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
        )
        .expect("Failed to build test signer"),
    )
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<dyn AssetStore>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn setup_test_app_with(store: Arc<dyn AssetStore>, signer: Arc<dyn ObjectSigner>) -> TestApp {
    let config = test_config();
    let state = Arc::new(AppState::new(config.clone(), store.clone(), signer));
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, store }
}

/// Application over an empty in-memory store.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(Arc::new(MemoryAssetStore::new()), test_signer())
}
