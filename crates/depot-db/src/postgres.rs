use crate::traits::{AssetStore, PutCondition, RecordResult, RecordStoreError};
use async_trait::async_trait;
use depot_core::{AssetId, AssetRecord, AssetStatus, RecordBackend};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// PostgreSQL record store
///
/// Conditional puts map onto single statements: `INSERT ... ON CONFLICT DO NOTHING`
/// for a fresh key and `UPDATE ... WHERE id = $1` for an existing one. A statement
/// that touches no row means the precondition failed.
#[derive(Clone)]
pub struct PostgresAssetStore {
    pool: PgPool,
    table: String,
}

impl PostgresAssetStore {
    /// Connect a pool and make sure the asset table exists.
    ///
    /// `table` must already be validated as a plain SQL identifier.
    pub async fn connect(
        database_url: &str,
        table: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> RecordResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await
            .map_err(|e| RecordStoreError::Config(format!("Failed to connect: {}", e)))?;

        let store = Self::new(pool, table);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn new(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            table: table.to_string(),
        }
    }

    /// Create the asset table if it is missing.
    pub async fn ensure_schema(&self) -> RecordResult<()> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id TEXT PRIMARY KEY,
                status TEXT NOT NULL DEFAULT 'reserved'
                    CHECK (status IN ('reserved', 'uploaded')),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            table = self.table
        );
        sqlx::query(&ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RecordStoreError::Backend(e.to_string()))?;

        tracing::info!(table = %self.table, "Asset table ready");
        Ok(())
    }
}

#[async_trait]
impl AssetStore for PostgresAssetStore {
    async fn get(&self, id: &AssetId) -> RecordResult<Option<AssetRecord>> {
        let query = format!("SELECT status FROM {} WHERE id = $1", self.table);
        let row: Option<(Option<String>,)> = sqlx::query_as(&query)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, asset_id = %id, "PostgreSQL get failed");
                RecordStoreError::Backend(e.to_string())
            })?;

        let Some((status,)) = row else {
            return Ok(None);
        };

        let status = AssetStatus::from_stored(status.as_deref()).map_err(|e| {
            RecordStoreError::MalformedRecord {
                key: id.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Some(AssetRecord {
            id: id.clone(),
            status,
        }))
    }

    async fn put(&self, record: &AssetRecord, condition: PutCondition) -> RecordResult<()> {
        let query = match condition {
            PutCondition::KeyAbsent => format!(
                "INSERT INTO {} (id, status) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING",
                self.table
            ),
            PutCondition::KeyExists => format!(
                "UPDATE {} SET status = $2, updated_at = NOW() WHERE id = $1",
                self.table
            ),
        };

        let result = sqlx::query(&query)
            .bind(record.id.as_str())
            .bind(record.status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    asset_id = %record.id,
                    condition = ?condition,
                    "PostgreSQL conditional put failed"
                );
                RecordStoreError::Backend(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(RecordStoreError::ConditionFailed(record.id.to_string()));
        }

        Ok(())
    }

    async fn health_check(&self) -> RecordResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| RecordStoreError::Backend(e.to_string()))
    }

    fn backend_type(&self) -> RecordBackend {
        RecordBackend::Postgres
    }
}
