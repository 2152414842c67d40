use thiserror::Error;

/// Failures reported by an external store client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Table not found: {0}")]
    TableNotFound(String),
    #[error("Throttled: {0}")]
    Throttled(String),
    #[error("Service error: {0}")]
    Service(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether a caller may reasonably retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreError::ConnectionFailed(_) | StoreError::Throttled(_) | StoreError::Unavailable(_)
        )
    }
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Cannot encode field '{field}': {reason}")]
    Encoding { field: String, reason: String },
    #[error("Cannot decode field '{field}': {reason}")]
    Decoding { field: String, reason: String },
    #[error("Schema error: {0}")]
    Schema(String),
    #[error("Protocol error: {0}")]
    Protocol(String),
    #[error("Store execution failed: {0}")]
    StoreExecution(#[from] StoreError),
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
}

impl RepositoryError {
    pub(crate) fn encoding(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RepositoryError::Encoding {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn decoding(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RepositoryError::Decoding {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
