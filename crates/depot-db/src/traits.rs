//! Record store abstraction trait
//!
//! The asset lifecycle relies on two primitives of the underlying key-value store:
//! a strongly consistent read by key and a conditional put by key. Every backend
//! must make each conditional put atomic with respect to concurrent puts on the
//! same key; all cross-request coordination rests on that guarantee.

use async_trait::async_trait;
use depot_core::{AssetId, AssetRecord, RecordBackend};
use thiserror::Error;

/// Record store operation errors
#[derive(Debug, Error)]
pub enum RecordStoreError {
    /// The put precondition did not hold. Nothing was written.
    #[error("Conditional check failed for key '{0}'")]
    ConditionFailed(String),

    #[error("Record store backend error: {0}")]
    Backend(String),

    #[error("Malformed record '{key}': {reason}")]
    MalformedRecord { key: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RecordStoreError {
    pub fn is_condition_failed(&self) -> bool {
        matches!(self, RecordStoreError::ConditionFailed(_))
    }
}

/// Result type for record store operations
pub type RecordResult<T> = Result<T, RecordStoreError>;

/// Precondition attached to a put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutCondition {
    /// No record with the key exists yet (claiming a fresh id).
    KeyAbsent,
    /// A record with the key already exists (lifecycle transition).
    KeyExists,
}

/// Record store trait
///
/// Held as `Arc<dyn AssetStore>` so the lifecycle services can run against any
/// backend, including test doubles.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Read a record with linearizable consistency. `None` when no record exists.
    async fn get(&self, id: &AssetId) -> RecordResult<Option<AssetRecord>>;

    /// Write the full record if `condition` holds, otherwise fail with
    /// `RecordStoreError::ConditionFailed`.
    async fn put(&self, record: &AssetRecord, condition: PutCondition) -> RecordResult<()>;

    /// Cheap round trip proving the store is reachable.
    async fn health_check(&self) -> RecordResult<()>;

    /// Get the record backend type
    fn backend_type(&self) -> RecordBackend;
}
