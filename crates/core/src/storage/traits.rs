use async_trait::async_trait;

use super::{AttributeMap, GetRequest, PutRequest, ScanPage, ScanRequest, StoreError};

/// Executes request descriptors against a remote attribute store.
///
/// Implementations own transport, timeouts and retries; the repository layer
/// never retries on its own.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Writes an item, replacing any item with the same key.
    async fn put(&self, request: PutRequest) -> Result<(), StoreError>;

    /// Fetches one item by key.
    async fn get(&self, request: GetRequest) -> Result<Option<AttributeMap>, StoreError>;

    /// Executes one scan page.
    async fn scan(&self, request: ScanRequest) -> Result<ScanPage, StoreError>;
}

/// Synchronous counterpart of [`StoreClient`] for clients that block.
///
/// Callers on an async runtime must not invoke these directly; run them on a
/// worker pool instead.
pub trait BlockingStoreClient: Send + Sync + 'static {
    fn put(&self, request: PutRequest) -> Result<(), StoreError>;

    fn get(&self, request: GetRequest) -> Result<Option<AttributeMap>, StoreError>;

    fn scan(&self, request: ScanRequest) -> Result<ScanPage, StoreError>;
}
