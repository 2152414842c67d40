//! Application state with store-backed services.
//!
//! The store client is chosen at compile time; repositories are built once
//! here and shared with every handler through the service.

use std::sync::Arc;

use tokio::sync::watch;

use spatium_core::model::{Comment, Post};
use spatium_core::storage::{Repository, StoreClient};

use crate::{config::Config, service::PostService, worker::WorkerPool};

/// Shared application state.
///
/// This is cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Post and comment operations.
    pub posts: Arc<PostService>,
    /// Worker pool running blocking store calls, when the backend needs one.
    pub pool: Option<Arc<WorkerPool>>,
    /// Flips to `true` on shutdown; open scans stop before their next page.
    shutdown_tx: Arc<watch::Sender<bool>>,
}

impl AppState {
    /// Builds the state around an already configured store client.
    pub fn new(store: Arc<dyn StoreClient>, config: &Config) -> anyhow::Result<Self> {
        let posts = Repository::<Post>::with_table_prefix(&config.table_prefix)?
            .with_page_size(config.scan_page_size);
        let comments = Repository::<Comment>::with_table_prefix(&config.table_prefix)?
            .with_page_size(config.scan_page_size);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let service = PostService::new(store, posts, comments).with_shutdown(shutdown_rx);

        Ok(Self {
            posts: Arc::new(service),
            pool: None,
            shutdown_tx: Arc::new(shutdown_tx),
        })
    }

    /// Attach the worker pool so health checks can report on it.
    pub fn with_pool(mut self, pool: Arc<WorkerPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Creates state backed by the in-memory store on a worker pool.
    #[cfg(feature = "inmemory")]
    pub fn in_memory(config: &Config) -> anyhow::Result<Self> {
        use crate::storage::{inmemory::InMemoryStore, pooled::PooledStore};

        let store = InMemoryStore::new(config.scan_page_size as usize);
        for (table, key_field) in [
            table_of::<Post>(config)?,
            table_of::<Comment>(config)?,
        ] {
            store.create_table(table, key_field);
        }

        let pool = Arc::new(WorkerPool::new(
            config.worker_count,
            config.worker_queue_depth,
        )?);
        let store: Arc<dyn StoreClient> =
            Arc::new(PooledStore::new(Arc::new(store), Arc::clone(&pool)));

        Ok(Self::new(store, config)?.with_pool(pool))
    }

    /// Creates state backed by DynamoDB.
    #[cfg(feature = "dynamodb")]
    pub async fn dynamodb(config: &Config) -> anyhow::Result<Self> {
        use crate::storage::dynamodb::DynamoDbStore;

        let store = DynamoDbStore::from_env(config.dynamodb_endpoint.as_deref()).await?;
        Self::new(Arc::new(store), config)
    }

    /// Signal open scans to stop.
    pub fn signal_shutdown(&self) {
        // Receivers live in the service, so this only fails after teardown.
        let _ = self.shutdown_tx.send(true);
    }
}

#[cfg(feature = "inmemory")]
fn table_of<T: spatium_core::storage::Entity>(
    config: &Config,
) -> anyhow::Result<(String, &'static str)> {
    let repo = Repository::<T>::with_table_prefix(&config.table_prefix)?;
    Ok((repo.table_name().to_string(), repo.key_field()))
}
