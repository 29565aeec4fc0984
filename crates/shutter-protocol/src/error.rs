use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("chunk payload too large: {size} bytes (max {max})")]
    ChunkTooLarge { size: usize, max: usize },

    #[error("frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: usize, max: usize },

    #[error("framing error: {0}")]
    FramingError(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
