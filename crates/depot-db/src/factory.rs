#[cfg(feature = "records-dynamodb")]
use crate::DynamoDbAssetStore;
#[cfg(feature = "records-postgres")]
use crate::PostgresAssetStore;
use crate::{AssetStore, MemoryAssetStore, RecordResult, RecordStoreError};
use depot_core::{Config, RecordBackend};
use std::sync::Arc;

/// Create a record store based on configuration
pub async fn create_asset_store(config: &Config) -> RecordResult<Arc<dyn AssetStore>> {
    match config.record_backend() {
        #[cfg(feature = "records-dynamodb")]
        RecordBackend::DynamoDb => {
            let store = DynamoDbAssetStore::new(
                config.asset_table(),
                config.s3_region().map(String::from),
                config.dynamodb_endpoint().map(String::from),
            )
            .await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "records-dynamodb"))]
        RecordBackend::DynamoDb => Err(RecordStoreError::Config(
            "DynamoDB record store not available (records-dynamodb feature not enabled)"
                .to_string(),
        )),

        #[cfg(feature = "records-postgres")]
        RecordBackend::Postgres => {
            let database_url = config.database_url().ok_or_else(|| {
                RecordStoreError::Config("DATABASE_URL not configured".to_string())
            })?;
            let store = PostgresAssetStore::connect(
                database_url,
                config.asset_table(),
                config.db_max_connections(),
                config.db_timeout(),
            )
            .await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "records-postgres"))]
        RecordBackend::Postgres => Err(RecordStoreError::Config(
            "PostgreSQL record store not available (records-postgres feature not enabled)"
                .to_string(),
        )),

        RecordBackend::Memory => {
            tracing::warn!("Using the in-memory record store; records are lost on restart");
            Ok(Arc::new(MemoryAssetStore::new()))
        }
    }
}
