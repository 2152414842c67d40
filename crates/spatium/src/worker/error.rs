use thiserror::Error;

/// Worker pool errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Worker channel closed")]
    ChannelClosed,

    #[error("Job dropped before completion")]
    Canceled,

    #[error("Worker pool overloaded")]
    Overloaded,

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(String),

    #[error("Invalid pool configuration: {0}")]
    InvalidConfig(String),
}
