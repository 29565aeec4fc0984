use shutter_ingest::IngestError;
use shutter_paging::PagingError;
use shutter_store::StoreError;
use shutter_types::{PhotoName, UserName};
use thiserror::Error;

/// Errors surfaced at the service boundary.
///
/// Every operation reports its failure here; nothing is retried
/// internally and no failure is silently absorbed.
#[derive(Debug, Error)]
pub enum AlbumError {
    #[error("user not found: {0}")]
    UserNotFound(UserName),

    #[error("photo not found: {0}")]
    PhotoNotFound(PhotoName),

    #[error("page token not found: {0}")]
    TokenNotFound(String),

    #[error("update contains no fields")]
    EmptyUpdate,

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Paging(#[from] PagingError),

    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for AlbumError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserNotFound(name) => Self::UserNotFound(name),
            StoreError::PhotoNotFound(name) => Self::PhotoNotFound(name),
            other => Self::Store(other),
        }
    }
}

/// Result alias for service operations.
pub type AlbumResult<T> = Result<T, AlbumError>;
