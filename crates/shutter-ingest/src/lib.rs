//! Chunked upload pipeline for the Shutter photo-album service.
//!
//! A photo arrives as a finite, strictly ordered stream of [`Chunk`]s over
//! a bounded channel. The [`ChunkAssembler`] pulls chunks with
//! backpressure, verifies a per-chunk content digest and a whole-object
//! digest, classifies the assembled bytes, and commits the result to a
//! media store in a single write.
//!
//! # Guarantees
//!
//! - Chunks are consumed in arrival order; the assembler never reorders.
//! - Every failure path returns before the media write, so commits are
//!   all-or-nothing: no partial object is ever persisted.
//! - An early failure drops the channel receiver, which closes the stream
//!   toward the producer and discards everything buffered.
//! - Memory is bounded by [`MAX_CHUNKS_PER_UPLOAD`] × [`MAX_CHUNK_BYTES`].

pub mod assembler;
pub mod chunk;
pub mod error;

pub use assembler::{AssembledPhoto, ChunkAssembler};
pub use chunk::{Chunk, MAX_CHUNKS_PER_UPLOAD, MAX_CHUNK_BYTES};
pub use error::{IngestError, IngestResult};
