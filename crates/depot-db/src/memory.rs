//! In-process record store for local development and tests.

use crate::traits::{AssetStore, PutCondition, RecordResult, RecordStoreError};
use async_trait::async_trait;
use depot_core::{AssetId, AssetRecord, AssetStatus, RecordBackend};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Record store backed by a `HashMap`. The write lock spans check and insert,
/// which makes every conditional put atomic.
#[derive(Clone, Default)]
pub struct MemoryAssetStore {
    records: Arc<RwLock<HashMap<AssetId, AssetStatus>>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn get(&self, id: &AssetId) -> RecordResult<Option<AssetRecord>> {
        let records = self.records.read().await;
        Ok(records.get(id).map(|status| AssetRecord {
            id: id.clone(),
            status: *status,
        }))
    }

    async fn put(&self, record: &AssetRecord, condition: PutCondition) -> RecordResult<()> {
        let mut records = self.records.write().await;
        let exists = records.contains_key(&record.id);

        let holds = match condition {
            PutCondition::KeyAbsent => !exists,
            PutCondition::KeyExists => exists,
        };
        if !holds {
            return Err(RecordStoreError::ConditionFailed(record.id.to_string()));
        }

        records.insert(record.id.clone(), record.status);
        Ok(())
    }

    async fn health_check(&self) -> RecordResult<()> {
        Ok(())
    }

    fn backend_type(&self) -> RecordBackend {
        RecordBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;

    #[tokio::test]
    async fn test_key_absent_claims_once() {
        let store = MemoryAssetStore::new();
        let record = AssetRecord::reserved(AssetId::from("abc123"));

        store.put(&record, PutCondition::KeyAbsent).await.unwrap();
        let second = store.put(&record, PutCondition::KeyAbsent).await;

        assert!(matches!(second, Err(RecordStoreError::ConditionFailed(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_key_exists_requires_prior_record() {
        let store = MemoryAssetStore::new();
        let uploaded = AssetRecord::uploaded(AssetId::from("missing"));

        let result = store.put(&uploaded, PutCondition::KeyExists).await;
        assert!(result.unwrap_err().is_condition_failed());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_transition_visible_to_readers() {
        let store = MemoryAssetStore::new();
        let id = AssetId::from("abc123");

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
    async fn test_concurrent_claims_on_same_key_have_one_winner() {
        let store = MemoryAssetStore::new();
        let attempts = (0..32).map(|_| {
            let store = store.clone();
            async move {
                store
                    .put(
                        &AssetRecord::reserved(AssetId::from("contested")),
                        PutCondition::KeyAbsent,
                    )
                    .await
            }
        });

        let results = join_all(attempts).await;
        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(RecordStoreError::is_condition_failed));
    }
}
