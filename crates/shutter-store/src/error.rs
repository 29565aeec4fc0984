use shutter_types::{PhotoName, UserName};

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The scope (parent user) does not resolve to a known entity.
    #[error("user not found: {0}")]
    UserNotFound(UserName),

    /// The photo record does not exist.
    #[error("photo not found: {0}")]
    PhotoNotFound(PhotoName),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
