use std::sync::Arc;

use shutter_store::MediaStore;
use shutter_types::{ContentDigest, PhotoFormat, PhotoName};
use tokio::sync::mpsc;

use crate::chunk::{Chunk, MAX_CHUNKS_PER_UPLOAD};
use crate::error::{IngestError, IngestResult};

/// A fully assembled, verified, committed photo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledPhoto {
    /// Logical name of the object.
    pub name: PhotoName,
    /// Detected binary format.
    pub format: PhotoFormat,
    /// The exact arrival-order concatenation of all chunk payloads.
    pub data: Vec<u8>,
}

/// Reassembles a photo from an ordered chunk stream.
///
/// The assembler pulls from a bounded channel, so a slow consumer
/// backpressures the producer. Validation happens incrementally: a
/// corrupt or oversize stream is abandoned at the offending chunk without
/// consuming the rest.
pub struct ChunkAssembler {
    media: Arc<dyn MediaStore>,
    max_chunks: usize,
}

impl ChunkAssembler {
    /// Create an assembler committing into `media`.
    pub fn new(media: Arc<dyn MediaStore>) -> Self {
        Self {
            media,
            max_chunks: MAX_CHUNKS_PER_UPLOAD,
        }
    }

    /// Override the chunk-count policy (tests, embedding).
    pub fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks;
        self
    }

    /// Consume one upload stream and commit the result.
    ///
    /// Returns the assembled photo on success. On any failure the receiver
    /// is dropped, closing the channel toward the producer, and nothing is
    /// committed.
    pub async fn assemble(&self, mut rx: mpsc::Receiver<Chunk>) -> IngestResult<AssembledPhoto> {
        let mut data: Vec<u8> = Vec::new();
        let mut transfer: Option<(PhotoName, ContentDigest)> = None;
        let mut count = 0usize;

        while let Some(chunk) = rx.recv().await {
            if count == self.max_chunks {
                return Err(IngestError::TooManyChunks {
                    max: self.max_chunks,
                });
            }
            if !chunk.payload_digest.matches(&chunk.payload) {
                return Err(IngestError::ChunkCorrupted { index: count });
            }
            // Name and whole-object digest are fixed by the first chunk.
            transfer.get_or_insert((chunk.name, chunk.object_digest));
            data.extend_from_slice(&chunk.payload);
            count += 1;
        }

        let (name, object_digest) = transfer.ok_or(IngestError::EmptyStream)?;
        if !object_digest.matches(&data) {
            return Err(IngestError::ObjectCorrupted);
        }

        let format = PhotoFormat::detect(&data).ok_or(IngestError::UnsupportedFormat)?;
        self.media.put(&name, format, &data)?;
        tracing::info!(name = %name, format = %format, bytes = data.len(), chunks = count, "upload committed");

        Ok(AssembledPhoto { name, format, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::MAX_CHUNK_BYTES;
    use shutter_store::InMemoryMediaStore;
    use shutter_types::format::PNG_MAGIC;

    fn media() -> Arc<InMemoryMediaStore> {
        Arc::new(InMemoryMediaStore::new())
    }

    fn photo_name() -> PhotoName {
        PhotoName::from_ids("u1", "p1").unwrap()
    }

    fn png_bytes(extra: usize) -> Vec<u8> {
        let mut data = PNG_MAGIC.to_vec();
        data.extend(std::iter::repeat(0xAB).take(extra));
        data
    }

    async fn assemble_chunks(
        assembler: &ChunkAssembler,
        chunks: Vec<Chunk>,
    ) -> IngestResult<AssembledPhoto> {
        let (tx, rx) = mpsc::channel(chunks.len().max(1));
        for chunk in chunks {
            tx.send(chunk).await.unwrap();
        }
        drop(tx);
        assembler.assemble(rx).await
    }

    // -----------------------------------------------------------------------
    // Success paths
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn valid_stream_assembles_and_commits() {
        let media = media();
        let assembler = ChunkAssembler::new(media.clone());
        let data = png_bytes(50_000);
        let chunks = Chunk::split(&photo_name(), &data);
        assert!(chunks.len() > 1);

        let photo = assemble_chunks(&assembler, chunks).await.unwrap();
        assert_eq!(photo.format, PhotoFormat::Png);
        assert_eq!(photo.data, data);

        let (format, committed) = media.get(&photo_name()).unwrap().expect("committed");
        assert_eq!(format, PhotoFormat::Png);
        assert_eq!(committed, data);
    }

    #[tokio::test]
    async fn payloads_concatenate_in_arrival_order() {
        let media = media();
        let assembler = ChunkAssembler::new(media.clone());

        let mut whole = PNG_MAGIC.to_vec();
        whole.extend_from_slice(b"first");
        whole.extend_from_slice(b"second");
        let object_digest = ContentDigest::of(&whole);

        let chunks = vec![
            Chunk::sealed(photo_name(), PNG_MAGIC.to_vec(), object_digest),
            Chunk::sealed(photo_name(), b"first".to_vec(), object_digest),
            Chunk::sealed(photo_name(), b"second".to_vec(), object_digest),
        ];
        let photo = assemble_chunks(&assembler, chunks).await.unwrap();
        assert_eq!(photo.data, whole);
    }

    // -----------------------------------------------------------------------
    // Integrity failures
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn corrupted_chunk_is_rejected_and_nothing_committed() {
        let media = media();
        let assembler = ChunkAssembler::new(media.clone());
        let data = png_bytes(1000);
        let mut chunks = Chunk::split(&photo_name(), &data);
        // Flip a payload byte without updating its declared digest.
        chunks[0].payload[10] ^= 0xFF;

        let err = assemble_chunks(&assembler, chunks).await.unwrap_err();
        assert!(matches!(err, IngestError::ChunkCorrupted { index: 0 }));
        assert!(media.is_empty());
    }

    #[tokio::test]
    async fn corrupted_chunk_index_is_reported() {
        let media = media();
        let assembler = ChunkAssembler::new(media.clone());
        let data = png_bytes(MAX_CHUNK_BYTES * 2);
        let mut chunks = Chunk::split(&photo_name(), &data);
        chunks[2].payload[0] ^= 0xFF;

        let err = assemble_chunks(&assembler, chunks).await.unwrap_err();
        assert!(matches!(err, IngestError::ChunkCorrupted { index: 2 }));
    }

    #[tokio::test]
    async fn whole_object_mismatch_is_rejected() {
        let media = media();
        let assembler = ChunkAssembler::new(media.clone());
        let wrong_digest = ContentDigest::of(b"some other object");
        let chunks = vec![Chunk::sealed(photo_name(), png_bytes(100), wrong_digest)];

        let err = assemble_chunks(&assembler, chunks).await.unwrap_err();
        assert!(matches!(err, IngestError::ObjectCorrupted));
        assert!(media.is_empty());
    }

    // -----------------------------------------------------------------------
    // Policy failures
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn oversize_stream_is_rejected() {
        let media = media();
        let assembler = ChunkAssembler::new(media.clone());

        // 101 individually valid chunks against a 100-chunk policy.
        let data = png_bytes(0);
        let object_digest = ContentDigest::of(&data);
        let chunks: Vec<Chunk> = (0..MAX_CHUNKS_PER_UPLOAD + 1)
            .map(|_| Chunk::sealed(photo_name(), data.clone(), object_digest))
            .collect();

        let err = assemble_chunks(&assembler, chunks).await.unwrap_err();
        assert!(matches!(
            err,
            IngestError::TooManyChunks {
                max: MAX_CHUNKS_PER_UPLOAD
            }
        ));
        assert!(media.is_empty());
    }

    #[tokio::test]
    async fn oversize_stream_aborts_without_full_consumption() {
        let media = media();
        let assembler = ChunkAssembler::new(media.clone()).with_max_chunks(4);
        let (tx, rx) = mpsc::channel(1);

        let producer = tokio::spawn(async move {
            let data = b"\x89PNG\r\n\x1a\n".to_vec();
            let object_digest = ContentDigest::of(&data);
            let mut sent = 0usize;
            loop {
                let chunk = Chunk::sealed(
                    PhotoName::from_ids("u1", "p1").unwrap(),
                    data.clone(),
                    object_digest,
                );
                if tx.send(chunk).await.is_err() {
                    break;
                }
                sent += 1;
            }
            sent
        });

        let err = assembler.assemble(rx).await.unwrap_err();
        assert!(matches!(err, IngestError::TooManyChunks { max: 4 }));

        // The producer observed a closed channel well before pushing
        // anything close to an unbounded stream.
        let sent = producer.await.unwrap();
        assert!(sent <= 6, "producer pushed {sent} chunks after abort");
        assert!(media.is_empty());
    }

    #[tokio::test]
    async fn empty_stream_is_rejected() {
        let media = media();
        let assembler = ChunkAssembler::new(media.clone());
        let err = assemble_chunks(&assembler, Vec::new()).await.unwrap_err();
        assert!(matches!(err, IngestError::EmptyStream));
    }

    // -----------------------------------------------------------------------
    // Format sniffing
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn unrecognized_format_is_rejected_after_integrity_checks() {
        let media = media();
        let assembler = ChunkAssembler::new(media.clone());
        let chunks = Chunk::split(&photo_name(), b"definitely not an image");

        let err = assemble_chunks(&assembler, chunks).await.unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat));
        assert!(media.is_empty());
    }
}
