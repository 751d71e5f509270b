//! Asset record stores
//!
//! This crate provides a unified interface over the key-value stores that hold
//! asset records. Supported backends:
//! - DynamoDB (feature: `records-dynamodb`)
//! - PostgreSQL (feature: `records-postgres`)
//! - In-memory (always available)

pub mod factory;
pub mod memory;
pub mod traits;

#[cfg(feature = "records-dynamodb")]
pub mod dynamodb;

#[cfg(feature = "records-postgres")]
pub mod postgres;

pub use factory::create_asset_store;
pub use memory::MemoryAssetStore;
pub use traits::{AssetStore, PutCondition, RecordResult, RecordStoreError};

#[cfg(feature = "records-dynamodb")]
pub use dynamodb::DynamoDbAssetStore;

#[cfg(feature = "records-postgres")]
pub use postgres::PostgresAssetStore;
