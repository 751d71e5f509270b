#![cfg(feature = "records-postgres")]

use depot_core::{AssetId, AssetRecord, AssetStatus};
use depot_db::{AssetStore, PostgresAssetStore, PutCondition};
use std::time::Duration;

async fn connect() -> PostgresAssetStore {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    PostgresAssetStore::connect(&url, "assets_test", 2, Duration::from_secs(5))
        .await
        .expect("failed to connect to test database")
}

fn unique_id(label: &str) -> AssetId {
    AssetId::from(format!("{}-{}", label, uuid::Uuid::new_v4().simple()))
}

#[tokio::test]
#[ignore] // Requires a PostgreSQL instance at TEST_DATABASE_URL
async fn test_reserve_then_mark_uploaded() {
    let store = connect().await;
    let id = unique_id("lifecycle");

    store
        .put(&AssetRecord::reserved(id.clone()), PutCondition::KeyAbsent)
        .await
        .unwrap();
    assert_eq!(
        store.get(&id).await.unwrap().map(|r| r.status),
        Some(AssetStatus::Reserved)
    );

    store
        .put(&AssetRecord::uploaded(id.clone()), PutCondition::KeyExists)
        .await
        .unwrap();
    assert_eq!(
        store.get(&id).await.unwrap().map(|r| r.status),
        Some(AssetStatus::Uploaded)
    );
}

#[tokio::test]
#[ignore] // Requires a PostgreSQL instance at TEST_DATABASE_URL
async fn test_conditions_are_enforced() {
    let store = connect().await;
    let id = unique_id("conditions");

    let missing = store
        .put(&AssetRecord::uploaded(id.clone()), PutCondition::KeyExists)
        .await;
    assert!(missing.unwrap_err().is_condition_failed());
    assert!(store.get(&id).await.unwrap().is_none());

    store
        .put(&AssetRecord::reserved(id.clone()), PutCondition::KeyAbsent)
        .await
        .unwrap();
    let duplicate = store
        .put(&AssetRecord::reserved(id.clone()), PutCondition::KeyAbsent)
        .await;
    assert!(duplicate.unwrap_err().is_condition_failed());
}
