//! DynamoDB store client.
//!
//! Implements [`StoreClient`] from `spatium_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use spatium_core::storage::{
    AttributeMap, GetRequest, PutRequest, ScanCursor, ScanPage, ScanRequest, StoreClient,
    StoreError,
};

use super::conversions::{from_sdk_item, to_sdk_item};
use super::error::{map_connection_error, map_get_item_error, map_put_item_error, map_scan_error};

/// DynamoDB-backed store client.
///
/// The SDK client is async and cheap to clone, so calls go straight to the
/// runtime without a worker pool. Retries and timeouts follow the SDK config.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Creates a store with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a store from environment configuration.
    ///
    /// Uses the AWS SDK default credential chain. `endpoint_url` overrides
    /// the service endpoint, e.g. for DynamoDB Local.
    pub async fn from_env(endpoint_url: Option<&str>) -> Result<Self, StoreError> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(url) = endpoint_url {
            if url.is_empty() {
                return Err(map_connection_error("DynamoDB endpoint URL is empty"));
            }
            loader = loader.endpoint_url(url);
        }
        let config = loader.load().await;

        tracing::info!(endpoint = ?endpoint_url, "DynamoDB client configured");

        Ok(Self::new(Client::new(&config)))
    }
}

#[async_trait]
impl StoreClient for DynamoDbStore {
    async fn put(&self, request: PutRequest) -> Result<(), StoreError> {
        let table = request.table_name;

        self.client
            .put_item()
            .table_name(&table)
            .set_item(Some(to_sdk_item(request.item)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &table))?;

        Ok(())
    }

    async fn get(&self, request: GetRequest) -> Result<Option<AttributeMap>, StoreError> {
        let table = request.table_name;

        let result = self
            .client
            .get_item()
            .table_name(&table)
            .set_key(Some(to_sdk_item(request.key)))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, &table))?;

        Ok(result.item.map(from_sdk_item))
    }

    async fn scan(&self, request: ScanRequest) -> Result<ScanPage, StoreError> {
        let filter = request.filter_expression();
        let table = request.table_name;

        let mut scan = self
            .client
            .scan()
            .table_name(&table)
            .set_exclusive_start_key(
                request
                    .exclusive_start
                    .map(|cursor| to_sdk_item(cursor.into_map())),
            )
            .set_limit(request.limit.map(|limit| limit.min(i32::MAX as u32) as i32));

        if let Some((expression, names, values)) = filter {
            scan = scan
                .filter_expression(expression)
                .set_expression_attribute_names(Some(names))
                .set_expression_attribute_values(Some(to_sdk_item(values)));
        }

        let result = scan.send().await.map_err(|e| map_scan_error(e, &table))?;

        let items = result
            .items
            .unwrap_or_default()
            .into_iter()
            .map(from_sdk_item)
            .collect();
        let cursor = result
            .last_evaluated_key
            .filter(|key| !key.is_empty())
            .map(|key| ScanCursor::new(from_sdk_item(key)));

        Ok(ScanPage { items, cursor })
    }
}
