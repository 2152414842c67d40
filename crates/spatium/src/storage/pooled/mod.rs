//! Async adapter that runs a blocking store client on a worker pool.

mod store;

pub use store::PooledStore;
