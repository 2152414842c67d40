//! Pure functions for mapping repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `Schema` -> 400 (Bad Request)
/// - `Encoding` / `Decoding` -> 500 (Internal Server Error)
/// - `Protocol` -> 502 (Bad Gateway)
/// - `StoreExecution` -> 503 when retryable, 500 otherwise
///
/// # Examples
///
/// ```
/// use spatium_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Post",
///     id: "abc-123".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::Schema(_) => 400,
        RepositoryError::Encoding { .. } => 500,
        RepositoryError::Decoding { .. } => 500,
        RepositoryError::Protocol(_) => 502,
        RepositoryError::StoreExecution(e) if e.is_retryable() => 503,
        RepositoryError::StoreExecution(_) => 500,
    }
}
