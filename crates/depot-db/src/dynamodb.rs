use crate::traits::{AssetStore, PutCondition, RecordResult, RecordStoreError};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use depot_core::{AssetId, AssetRecord, AssetStatus, RecordBackend};

const ID_ATTRIBUTE: &str = "id";
const STATUS_ATTRIBUTE: &str = "status";

/// DynamoDB record store
///
/// One item per asset, keyed by the string attribute `id`. Reads are
/// strongly consistent; puts carry `attribute_not_exists(id)` or
/// `attribute_exists(id)` so DynamoDB evaluates the precondition atomically.
#[derive(Clone)]
pub struct DynamoDbAssetStore {
    client: Client,
    table: String,
}

impl DynamoDbAssetStore {
    /// Create a store using the default AWS credential chain.
    ///
    /// `endpoint` points the client at DynamoDB Local or another compatible service.
    pub async fn new(
        table: impl Into<String>,
        region: Option<String>,
        endpoint: Option<String>,
    ) -> RecordResult<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Ok(Self::from_client(Client::from_conf(builder.build()), table))
    }

    pub fn from_client(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl AssetStore for DynamoDbAssetStore {
    async fn get(&self, id: &AssetId) -> RecordResult<Option<AssetRecord>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(ID_ATTRIBUTE, AttributeValue::S(id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %DisplayErrorContext(&e),
                    asset_id = %id,
                    table = %self.table,
                    "DynamoDB get_item failed"
                );
                RecordStoreError::Backend(DisplayErrorContext(&e).to_string())
            })?;

        let Some(item) = output.item() else {
            return Ok(None);
        };

        let raw_status = match item.get(STATUS_ATTRIBUTE) {
            None => None,
            Some(value) => Some(value.as_s().map_err(|_| RecordStoreError::MalformedRecord {
                key: id.to_string(),
                reason: "status attribute is not a string".to_string(),
            })?),
        };

        let status = AssetStatus::from_stored(raw_status.map(String::as_str)).map_err(|e| {
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
        let condition_expression = match condition {
            PutCondition::KeyAbsent => "attribute_not_exists(id)",
            PutCondition::KeyExists => "attribute_exists(id)",
        };

        let result = self
            .client
            .put_item()
            .table_name(&self.table)
            .item(ID_ATTRIBUTE, AttributeValue::S(record.id.to_string()))
            .item(
                STATUS_ATTRIBUTE,
                AttributeValue::S(record.status.as_str().to_string()),
            )
            .condition_expression(condition_expression)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_conditional_check_failed_exception()) =>
            {
                tracing::debug!(
                    asset_id = %record.id,
                    condition = ?condition,
                    "DynamoDB conditional check failed"
                );
                Err(RecordStoreError::ConditionFailed(record.id.to_string()))
            }
            Err(e) => {
                tracing::error!(
                    error = %DisplayErrorContext(&e),
                    asset_id = %record.id,
                    table = %self.table,
                    "DynamoDB put_item failed"
                );
                Err(RecordStoreError::Backend(
                    DisplayErrorContext(&e).to_string(),
                ))
            }
        }
    }

    async fn health_check(&self) -> RecordResult<()> {
        self.client
            .describe_table()
            .table_name(&self.table)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| RecordStoreError::Backend(DisplayErrorContext(&e).to_string()))
    }

    fn backend_type(&self) -> RecordBackend {
        RecordBackend::DynamoDb
    }
}
