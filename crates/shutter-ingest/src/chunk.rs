use serde::{Deserialize, Serialize};
use shutter_types::{ContentDigest, PhotoName};

/// Upper bound on chunks per upload. The 101st chunk aborts the stream.
pub const MAX_CHUNKS_PER_UPLOAD: usize = 100;

/// Upper bound on a single chunk's payload, chosen by the sender.
pub const MAX_CHUNK_BYTES: usize = 20_000;

/// One block of a multi-chunk photo upload.
///
/// Each chunk declares the digest of its own payload and the digest of the
/// whole object it belongs to. Chunks are ephemeral: they exist only for
/// the duration of one assembly call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Logical name of the object under transfer.
    pub name: PhotoName,
    /// This block's bytes.
    pub payload: Vec<u8>,
    /// Declared digest of `payload`.
    pub payload_digest: ContentDigest,
    /// Declared digest of the whole object (concatenation of all payloads).
    pub object_digest: ContentDigest,
}

impl Chunk {
    /// Build a chunk with a correctly computed payload digest.
    pub fn sealed(name: PhotoName, payload: Vec<u8>, object_digest: ContentDigest) -> Self {
        let payload_digest = ContentDigest::of(&payload);
        Self {
            name,
            payload,
            payload_digest,
            object_digest,
        }
    }

    /// Split `data` into a valid chunk sequence for `name`.
    ///
    /// This is the sender-side policy: payloads of at most
    /// [`MAX_CHUNK_BYTES`], digests computed per block and over the whole
    /// input. Empty input produces a single empty chunk so the declared
    /// whole-object digest still travels with the stream.
    pub fn split(name: &PhotoName, data: &[u8]) -> Vec<Self> {
        let object_digest = ContentDigest::of(data);
        if data.is_empty() {
            return vec![Self::sealed(name.clone(), Vec::new(), object_digest)];
        }
        data.chunks(MAX_CHUNK_BYTES)
            .map(|block| Self::sealed(name.clone(), block.to_vec(), object_digest))
            .collect()
    }
}
