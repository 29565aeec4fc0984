use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shutter_album::AlbumError;
use shutter_ingest::IngestError;
use shutter_protocol::{fault_codes, Fault, ProtocolError};
use shutter_types::TypeError;
use thiserror::Error;

/// Failures of the server itself (startup, config, I/O).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] shutter_store::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// A failed API call, carried until it becomes a status plus a
/// structured `{code, message}` fault body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Album(#[from] AlbumError),

    #[error("invalid resource name: {0}")]
    InvalidName(#[from] TypeError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Map a service error onto its transport status and fault payload.
pub fn fault_for(err: &AlbumError) -> (StatusCode, Fault) {
    match err {
        AlbumError::UserNotFound(_)
        | AlbumError::PhotoNotFound(_)
        | AlbumError::TokenNotFound(_) => (
            StatusCode::NOT_FOUND,
            Fault::new(fault_codes::NOT_FOUND, err.to_string()),
        ),
        AlbumError::Ingest(IngestError::ChunkCorrupted { .. })
        | AlbumError::Ingest(IngestError::ObjectCorrupted) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Fault::new(fault_codes::DATA_LOSS, err.to_string()),
        ),
        AlbumError::Ingest(IngestError::TooManyChunks { .. })
        | AlbumError::Ingest(IngestError::UnsupportedFormat) => (
            StatusCode::BAD_REQUEST,
            Fault::new(fault_codes::FAILED_PRECONDITION, err.to_string()),
        ),
        AlbumError::Ingest(IngestError::EmptyStream)
        | AlbumError::EmptyUpdate
        | AlbumError::Paging(_) => (
            StatusCode::BAD_REQUEST,
            Fault::new(fault_codes::INVALID_ARGUMENT, err.to_string()),
        ),
        AlbumError::Ingest(IngestError::Store(_)) | AlbumError::Store(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Fault::new(fault_codes::INTERNAL, err.to_string()),
        ),
    }
}

impl ApiError {
    fn status_and_fault(&self) -> (StatusCode, Fault) {
        match self {
            Self::Album(err) => fault_for(err),
            Self::InvalidName(err) => (
                StatusCode::BAD_REQUEST,
                Fault::new(fault_codes::INVALID_ARGUMENT, err.to_string()),
            ),
            Self::Protocol(err @ ProtocolError::ChunkTooLarge { .. })
            | Self::Protocol(err @ ProtocolError::FrameTooLarge { .. }) => (
                StatusCode::BAD_REQUEST,
                Fault::new(fault_codes::FAILED_PRECONDITION, err.to_string()),
            ),
            Self::Protocol(err) => (
                StatusCode::BAD_REQUEST,
                Fault::new(fault_codes::INVALID_ARGUMENT, err.to_string()),
            ),
            Self::Transport(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Fault::new(fault_codes::INTERNAL, message.clone()),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, fault) = self.status_and_fault();
        (status, Json(fault)).into_response()
    }
}
