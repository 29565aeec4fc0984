use shutter_ingest::{Chunk, MAX_CHUNK_BYTES};

use crate::error::{ProtocolError, ProtocolResult};

/// Upper bound on one encoded frame: the chunk payload policy plus frame
/// overhead (name, digests, bincode lengths).
pub const MAX_FRAME_BYTES: usize = MAX_CHUNK_BYTES + 4096;

/// Codec for the upload body: a sequence of `[4 bytes len][bincode chunk]`
/// frames.
pub struct ChunkCodec;

impl ChunkCodec {
    /// Encode one chunk with framing.
    pub fn encode(chunk: &Chunk) -> ProtocolResult<Vec<u8>> {
        if chunk.payload.len() > MAX_CHUNK_BYTES {
            return Err(ProtocolError::ChunkTooLarge {
                size: chunk.payload.len(),
                max: MAX_CHUNK_BYTES,
            });
        }
        let payload = bincode::serialize(chunk)
            .map_err(|e| ProtocolError::Serialization(e.to_string()))?;
        let mut buf = Vec::with_capacity(4 + payload.len());
        buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    /// Encode a whole chunk sequence as one body.
    pub fn encode_stream(chunks: &[Chunk]) -> ProtocolResult<Vec<u8>> {
        let mut buf = Vec::new();
        for chunk in chunks {
            buf.extend_from_slice(&Self::encode(chunk)?);
        }
        Ok(buf)
    }

    /// Decode a framed chunk from the front of `data`.
    ///
    /// Returns `Ok(None)` when `data` holds only a partial frame, so a
    /// streaming reader can buffer and retry; `Ok(Some((chunk, consumed)))`
    /// once a whole frame is available.
    pub fn decode(data: &[u8]) -> ProtocolResult<Option<(Chunk, usize)>> {
        if data.len() < 4 {
            return Ok(None);
        }
        let len = u32::from_be_bytes(data[0..4].try_into().unwrap()) as usize;
        if len == 0 {
            return Err(ProtocolError::FramingError("zero-length frame".into()));
        }
        if len > MAX_FRAME_BYTES {
            return Err(ProtocolError::FrameTooLarge {
                size: len,
                max: MAX_FRAME_BYTES,
            });
        }
        let total = 4 + len;
        if data.len() < total {
            return Ok(None);
        }
        let chunk: Chunk = bincode::deserialize(&data[4..total])
            .map_err(|e| ProtocolError::Deserialization(e.to_string()))?;
        Ok(Some((chunk, total)))
    }
}
