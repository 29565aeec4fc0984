use thiserror::Error;

/// Errors from pagination operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PagingError {
    /// A page context requires a positive page size.
    #[error("page size must be positive")]
    InvalidPageSize,
}

/// Result alias for pagination operations.
pub type PagingResult<T> = Result<T, PagingError>;
