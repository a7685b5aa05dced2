use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Failure reported by a storage collaborator. Propagated as-is, never retried.
    #[error("Repository error: {0}")]
    Repository(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed prediction percentage '{token}' at position {index}")]
    MalformedPercentage { token: String, index: usize },
}
