//! Service layer for the Shutter photo-album service.
//!
//! [`PhotoAlbum`] is the explicit capability set the transport binds to:
//! user and photo CRUD, cursor-paginated listing, the chunked upload
//! pipeline, media download, and the channel-based photo-echo stream.
//! [`AlbumService`] is the concrete implementation, orchestrating the
//! injected stores, the chunk assembler, and the cursor table.

pub mod error;
pub mod service;

pub use error::{AlbumError, AlbumResult};
pub use service::{AlbumService, PhotoListing, DEFAULT_PAGE_SIZE};

use async_trait::async_trait;
use shutter_ingest::Chunk;
use shutter_types::{Photo, PhotoFormat, PhotoName, User, UserName, UserPatch};
use tokio::sync::mpsc;

/// The capability set of the photo-album service.
///
/// The transport layer holds this as a trait object and maps each
/// operation onto an endpoint; no handler reaches past it into the
/// stores.
#[async_trait]
pub trait PhotoAlbum: Send + Sync {
    /// Register a user under a freshly minted name.
    async fn create_user(&self, display_name: String) -> AlbumResult<User>;

    /// Look up a user by name.
    async fn get_user(&self, name: &UserName) -> AlbumResult<User>;

    /// Apply a partial update to a user.
    ///
    /// A patch with no effective fields is a validation fault.
    async fn update_user(&self, name: &UserName, patch: UserPatch) -> AlbumResult<User>;

    /// Create a photo record under `parent` with a minted name and the
    /// current creation time.
    async fn create_photo(&self, parent: &UserName, display_name: String) -> AlbumResult<Photo>;

    /// Look up a photo record by name.
    async fn get_photo(&self, name: &PhotoName) -> AlbumResult<Photo>;

    /// Delete a photo record.
    async fn delete_photo(&self, name: &PhotoName) -> AlbumResult<()>;

    /// One page of `parent`'s photos.
    ///
    /// Without a token this starts a fresh listing in `order_key` order;
    /// with a token it resumes the listing the token was minted for (the
    /// token's context governs scope and order). The response carries a
    /// fresh token exactly when more results remain.
    async fn list_photos(
        &self,
        parent: &UserName,
        order_key: &str,
        page_token: Option<&str>,
    ) -> AlbumResult<PhotoListing>;

    /// Consume one chunked upload stream and commit the result.
    async fn upload_photo(&self, chunks: mpsc::Receiver<Chunk>) -> AlbumResult<()>;

    /// Read a committed media object back.
    async fn download_photo(&self, name: &PhotoName) -> AlbumResult<(PhotoFormat, Vec<u8>)>;

    /// Photo-echo stream: resolve names as they arrive and push each
    /// result, stopping when either channel closes.
    async fn stream_photos(
        &self,
        names: mpsc::Receiver<PhotoName>,
        results: mpsc::Sender<AlbumResult<Photo>>,
    );
}
