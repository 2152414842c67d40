use std::sync::Arc;

use async_trait::async_trait;
use spatium_core::storage::{
    AttributeMap, BlockingStoreClient, GetRequest, PutRequest, ScanPage, ScanRequest, StoreClient,
    StoreError,
};

use crate::worker::{PoolError, WorkerPool};

/// Exposes a [`BlockingStoreClient`] as an async [`StoreClient`].
///
/// Every call is submitted to the shared [`WorkerPool`]; the calling task
/// only awaits the result.
pub struct PooledStore<B> {
    inner: Arc<B>,
    pool: Arc<WorkerPool>,
}

impl<B: BlockingStoreClient> PooledStore<B> {
    pub fn new(inner: Arc<B>, pool: Arc<WorkerPool>) -> Self {
        Self { inner, pool }
    }

    pub fn inner(&self) -> &Arc<B> {
        &self.inner
    }
}

#[async_trait]
impl<B: BlockingStoreClient> StoreClient for PooledStore<B> {
    async fn put(&self, request: PutRequest) -> Result<(), StoreError> {
        let inner = Arc::clone(&self.inner);
        self.pool
            .submit(move || inner.put(request))
            .await
            .map_err(map_pool_error)?
    }

    async fn get(&self, request: GetRequest) -> Result<Option<AttributeMap>, StoreError> {
        let inner = Arc::clone(&self.inner);
        self.pool
            .submit(move || inner.get(request))
            .await
            .map_err(map_pool_error)?
    }

    async fn scan(&self, request: ScanRequest) -> Result<ScanPage, StoreError> {
        let inner = Arc::clone(&self.inner);
        self.pool
            .submit(move || inner.scan(request))
            .await
            .map_err(map_pool_error)?
    }
}

/// Pool failures are transient from the caller's point of view.
fn map_pool_error(err: PoolError) -> StoreError {
    tracing::warn!(error = %err, "Store call did not complete on worker pool");
    StoreError::Unavailable(err.to_string())
}
