//! Error types for repository operations.

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Data validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl RepositoryError {
    /// True for errors meaning the requested entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound(_))
    }
}

impl From<String> for RepositoryError {
    fn from(s: String) -> Self {
        RepositoryError::InternalError(s)
    }
}

impl From<&str> for RepositoryError {
    fn from(s: &str) -> Self {
        RepositoryError::InternalError(s.to_string())
    }
}
