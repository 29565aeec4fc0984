use shutter_store::StoreError;
use thiserror::Error;

/// Errors from the upload pipeline.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A chunk's payload does not match its declared digest.
    #[error("chunk {index} is corrupted: payload digest mismatch")]
    ChunkCorrupted { index: usize },

    /// The assembled bytes do not match the declared whole-object digest.
    #[error("assembled object is corrupted: whole-object digest mismatch")]
    ObjectCorrupted,

    /// The stream exceeded the chunk-count policy.
    #[error("too many chunks: limit is {max}")]
    TooManyChunks { max: usize },

    /// The assembled bytes are not a recognized media format.
    #[error("unsupported media format")]
    UnsupportedFormat,

    /// The stream ended before the first chunk arrived.
    #[error("upload stream contained no chunks")]
    EmptyStream,

    /// Failure committing to the media store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result alias for upload pipeline operations.
pub type IngestResult<T> = Result<T, IngestError>;
