//! Bounded worker pool for blocking calls.
//!
//! Blocking store clients run on dedicated OS threads so that request
//! handlers on the async runtime never block. Results come back over a
//! oneshot channel.

mod error;
mod pool;

pub use error::PoolError;
pub use pool::WorkerPool;
