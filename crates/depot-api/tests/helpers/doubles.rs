//! Fault-injecting collaborators.

use async_trait::async_trait;
use depot_core::{AssetId, AssetRecord, RecordBackend};
use depot_db::{AssetStore, PutCondition, RecordResult, RecordStoreError};
use depot_storage::{ObjectSigner, SignerError, SignerResult};
use std::time::Duration;

/// Store whose every operation fails with a backend error.
pub struct UnavailableStore;

#[async_trait]
impl AssetStore for UnavailableStore {
    async fn get(&self, _id: &AssetId) -> RecordResult<Option<AssetRecord>> {
        Err(RecordStoreError::Backend("connection refused".to_string()))
    }

    async fn put(&self, _record: &AssetRecord, _condition: PutCondition) -> RecordResult<()> {
        Err(RecordStoreError::Backend("connection refused".to_string()))
    }

    async fn health_check(&self) -> RecordResult<()> {
        Err(RecordStoreError::Backend("connection refused".to_string()))
    }

    fn backend_type(&self) -> RecordBackend {
        RecordBackend::Memory
    }
}

/// Store where every fresh-key insert collides.
pub struct SaturatedStore;

#[async_trait]
impl AssetStore for SaturatedStore {
    async fn get(&self, _id: &AssetId) -> RecordResult<Option<AssetRecord>> {
        Ok(None)
    }

    async fn put(&self, record: &AssetRecord, _condition: PutCondition) -> RecordResult<()> {
        Err(RecordStoreError::ConditionFailed(record.id.to_string()))
    }

    async fn health_check(&self) -> RecordResult<()> {
        Ok(())
    }

    fn backend_type(&self) -> RecordBackend {
        RecordBackend::Memory
    }
}

/// Signer that always fails.
pub struct BrokenSigner;

#[async_trait]
impl ObjectSigner for BrokenSigner {
    async fn presigned_put_url(&self, _key: &str, _expires_in: Duration) -> SignerResult<String> {
        Err(SignerError::Signing("credentials expired".to_string()))
    }

    async fn presigned_get_url(&self, _key: &str, _expires_in: Duration) -> SignerResult<String> {
        Err(SignerError::Signing("credentials expired".to_string()))
    }

    fn bucket(&self) -> &str {
        "broken"
    }
}
