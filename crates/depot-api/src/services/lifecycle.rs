//! Asset lifecycle state machine
//!
//! `Reserved` -> `Uploaded`, nothing else. The transition is a conditional put
//! that only requires the record to exist, so re-marking an uploaded asset
//! rewrites the same status and succeeds.

use depot_core::{AppError, AssetId, AssetRecord, AssetState};
use depot_db::{AssetStore, PutCondition, RecordStoreError};
use std::sync::Arc;

pub(crate) fn asset_not_found(id: &AssetId) -> AppError {
    AppError::NotFound(format!("Asset id '{}' not found.", id))
}

fn record_store_failure(err: RecordStoreError) -> AppError {
    AppError::RecordStore(err.to_string())
}

#[derive(Clone)]
pub struct AssetLifecycle {
    store: Arc<dyn AssetStore>,
}

impl AssetLifecycle {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self { store }
    }

    /// Move a reserved asset to `Uploaded`.
    ///
    /// `NotFound` when the id was never reserved, `RecordStore` for any other failure.
    pub async fn mark_uploaded(&self, id: &AssetId) -> Result<(), AppError> {
        let record = AssetRecord::uploaded(id.clone());
        match self.store.put(&record, PutCondition::KeyExists).await {
            Ok(()) => {
                tracing::info!(asset_id = %id, "Asset marked uploaded");
                Ok(())
            }
            Err(e) if e.is_condition_failed() => Err(asset_not_found(id)),
            Err(e) => Err(record_store_failure(e)),
        }
    }

    /// Classify the asset from a strongly consistent read.
    pub async fn current_state(&self, id: &AssetId) -> Result<AssetState, AppError> {
        let record = self.store.get(id).await.map_err(record_store_failure)?;
        Ok(AssetState::from(record.as_ref()))
    }
}
