//! HTTP transport for the Shutter photo-album service.
//!
//! Binds the [`PhotoAlbum`] capability trait to REST endpoints: user and
//! photo CRUD, cursor-paginated listing, the framed streaming upload, and
//! the photo-echo stream. Faults cross the wire as `{code, message}`
//! payloads with the statuses defined in [`error`].

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

use std::sync::Arc;

use shutter_album::PhotoAlbum;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use router::build_router;
pub use server::AlbumServer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The bound service implementation.
    pub album: Arc<dyn PhotoAlbum>,
    /// Bound of the chunk channel between upload ingress and assembly.
    pub upload_channel_capacity: usize,
}
