//! Wire contract for the Shutter photo-album service.
//!
//! Uploads travel as a body of length-prefixed bincode chunk frames
//! ([`ChunkCodec`]); everything else is JSON. Faults cross the wire as a
//! structured `{code, message}` payload ([`Fault`]) with a stable code
//! vocabulary.

pub mod codec;
pub mod endpoint;
pub mod error;
pub mod message;

pub use codec::{ChunkCodec, MAX_FRAME_BYTES};
pub use endpoint::{endpoints, HealthResponse};
pub use error::{ProtocolError, ProtocolResult};
pub use message::{
    fault_codes, CreatePhotoRequest, CreateUserRequest, Fault, ListPhotosQuery,
    ListPhotosResponse, PhotoEvent, StreamPhotosRequest,
};
