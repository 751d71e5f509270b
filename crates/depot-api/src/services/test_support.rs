//! Record store double with scripted failures.

use async_trait::async_trait;
use depot_core::{AssetId, AssetRecord, RecordBackend};
use depot_db::{AssetStore, MemoryAssetStore, PutCondition, RecordResult, RecordStoreError};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Delegates to a `MemoryAssetStore` after applying its script.
#[derive(Default)]
pub struct ScriptedStore {
    inner: MemoryAssetStore,
    collisions: AtomicUsize,
    fail_puts: bool,
    fail_gets: bool,
    put_calls: AtomicUsize,
}

impl ScriptedStore {
    /// The first `n` fresh-key inserts report a collision.
    pub fn colliding(n: usize) -> Self {
        Self {
            collisions: AtomicUsize::new(n),
            ..Self::default()
        }
    }

    pub fn failing_puts() -> Self {
        Self {
            fail_puts: true,
            ..Self::default()
        }
    }

    pub fn failing_gets() -> Self {
        Self {
            fail_gets: true,
            ..Self::default()
        }
    }

    pub fn inner(&self) -> &MemoryAssetStore {
        &self.inner
    }

    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetStore for ScriptedStore {
    async fn get(&self, id: &AssetId) -> RecordResult<Option<AssetRecord>> {
        if self.fail_gets {
            return Err(RecordStoreError::Backend("read throttled".to_string()));
        }
        self.inner.get(id).await
    }

    async fn put(&self, record: &AssetRecord, condition: PutCondition) -> RecordResult<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts {
            return Err(RecordStoreError::Backend("write throttled".to_string()));
        }
        if condition == PutCondition::KeyAbsent {
            let collided = self
                .collisions
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if collided {
                return Err(RecordStoreError::ConditionFailed(record.id.to_string()));
            }
        }
        self.inner.put(record, condition).await
    }

    async fn health_check(&self) -> RecordResult<()> {
        Ok(())
    }

    fn backend_type(&self) -> RecordBackend {
        RecordBackend::Memory
    }
}
