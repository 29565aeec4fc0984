use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use shutter_ingest::{Chunk, ChunkAssembler};
use shutter_paging::{page_of, CursorTable, PageContext, PageToken, PhotoOrder};
use shutter_store::{AlbumStore, InMemoryAlbumStore, InMemoryMediaStore, MediaStore};
use shutter_types::{Photo, PhotoFormat, PhotoName, User, UserName, UserPatch};
use tokio::sync::mpsc;

use crate::error::{AlbumError, AlbumResult};
use crate::PhotoAlbum;

/// Page size applied to fresh listings.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a listing, ready for the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoListing {
    pub photos: Vec<Photo>,
    /// Present exactly when more results remain.
    pub next_page_token: Option<String>,
}

/// Store-backed implementation of [`PhotoAlbum`].
///
/// Owns the cursor table and the chunk assembler; the stores are injected
/// so the same service runs against memory or filesystem backends.
pub struct AlbumService {
    store: Arc<dyn AlbumStore>,
    media: Arc<dyn MediaStore>,
    assembler: ChunkAssembler,
    cursors: CursorTable,
    page_size: usize,
}

impl AlbumService {
    /// Build a service over the given backends.
    pub fn new(store: Arc<dyn AlbumStore>, media: Arc<dyn MediaStore>) -> Self {
        let assembler = ChunkAssembler::new(media.clone());
        Self {
            store,
            media,
            assembler,
            cursors: CursorTable::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Fully in-memory service, for tests and demos.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryAlbumStore::new()),
            Arc::new(InMemoryMediaStore::new()),
        )
    }

    /// Override the listing page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// The cursor table, exposed for operational control.
    pub fn cursors(&self) -> &CursorTable {
        &self.cursors
    }
}

#[async_trait]
impl PhotoAlbum for AlbumService {
    async fn create_user(&self, display_name: String) -> AlbumResult<User> {
        let user = User::new(UserName::mint(), display_name);
        self.store.create_user(user.clone())?;
        Ok(user)
    }

    async fn get_user(&self, name: &UserName) -> AlbumResult<User> {
        self.store
            .get_user(name)?
            .ok_or_else(|| AlbumError::UserNotFound(name.clone()))
    }

    async fn update_user(&self, name: &UserName, patch: UserPatch) -> AlbumResult<User> {
        if patch.is_empty() {
            return Err(AlbumError::EmptyUpdate);
        }
        let existing = self
            .store
            .get_user(name)?
            .ok_or_else(|| AlbumError::UserNotFound(name.clone()))?;
        let updated = patch.apply(existing);
        self.store.update_user(updated.clone())?;
        Ok(updated)
    }

    async fn create_photo(&self, parent: &UserName, display_name: String) -> AlbumResult<Photo> {
        let photo = Photo::new(PhotoName::mint(parent), display_name, Utc::now());
        self.store.add_photo(photo.clone())?;
        Ok(photo)
    }

    async fn get_photo(&self, name: &PhotoName) -> AlbumResult<Photo> {
        self.store
            .get_photo(name)?
            .ok_or_else(|| AlbumError::PhotoNotFound(name.clone()))
    }

    async fn delete_photo(&self, name: &PhotoName) -> AlbumResult<()> {
        if self.store.delete_photo(name)? {
            Ok(())
        } else {
            Err(AlbumError::PhotoNotFound(name.clone()))
        }
    }

    async fn list_photos(
        &self,
        parent: &UserName,
        order_key: &str,
        page_token: Option<&str>,
    ) -> AlbumResult<PhotoListing> {
        let context = match page_token {
            Some(token) => self
                .cursors
                .resolve(&PageToken::from(token))
                .ok_or_else(|| AlbumError::TokenNotFound(token.to_string()))?,
            None => PageContext::first(
                parent.clone(),
                PhotoOrder::from_key(order_key),
                self.page_size,
            )?,
        };

        let photos = self.store.photos_of(context.scope())?;
        let page = page_of(photos, &context);

        let next_page_token = page
            .has_more
            .then(|| self.cursors.mint(context.next_page()).to_string());

        Ok(PhotoListing {
            photos: page.photos,
            next_page_token,
        })
    }

    async fn upload_photo(&self, chunks: mpsc::Receiver<Chunk>) -> AlbumResult<()> {
        self.assembler.assemble(chunks).await?;
        Ok(())
    }

    async fn download_photo(&self, name: &PhotoName) -> AlbumResult<(PhotoFormat, Vec<u8>)> {
        self.media
            .get(name)?
            .ok_or_else(|| AlbumError::PhotoNotFound(name.clone()))
    }

    async fn stream_photos(
        &self,
        mut names: mpsc::Receiver<PhotoName>,
        results: mpsc::Sender<AlbumResult<Photo>>,
    ) {
        while let Some(name) = names.recv().await {
            let result = self
                .store
                .get_photo(&name)
                .map_err(AlbumError::from)
                .and_then(|photo| photo.ok_or(AlbumError::PhotoNotFound(name)));
            if results.send(result).await.is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shutter_ingest::IngestError;
    use shutter_types::format::PNG_MAGIC;
    use shutter_types::ContentDigest;

    fn png_bytes(extra: usize) -> Vec<u8> {
        let mut data = PNG_MAGIC.to_vec();
        data.extend(std::iter::repeat(0xCD).take(extra));
        data
    }

    async fn seeded_service(photo_count: usize) -> (AlbumService, UserName) {
        let service = AlbumService::in_memory();
        let user = service.create_user("Alice".into()).await.unwrap();
        for i in 0..photo_count {
            service
                .create_photo(&user.name, format!("photo {i:03}"))
                .await
                .unwrap();
        }
        (service, user.name)
    }

    async fn send_all(chunks: Vec<Chunk>) -> mpsc::Receiver<Chunk> {
        let (tx, rx) = mpsc::channel(chunks.len().max(1));
        for chunk in chunks {
            tx.send(chunk).await.unwrap();
        }
        rx
    }

    // -----------------------------------------------------------------------
    // User CRUD
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn create_then_get_user() {
        let service = AlbumService::in_memory();
        let created = service.create_user("Alice".into()).await.unwrap();
        let fetched = service.get_user(&created.name).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_unknown_user_is_not_found() {
        let service = AlbumService::in_memory();
        let err = service
            .get_user(&UserName::from_id("ghost").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AlbumError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn update_user_applies_patch() {
        let service = AlbumService::in_memory();
        let user = service.create_user("Alice".into()).await.unwrap();
        let updated = service
            .update_user(
                &user.name,
                UserPatch {
                    display_name: Some("Bob".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.display_name, "Bob");
        assert_eq!(service.get_user(&user.name).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn empty_update_is_rejected() {
        let service = AlbumService::in_memory();
        let user = service.create_user("Alice".into()).await.unwrap();
        let err = service
            .update_user(&user.name, UserPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AlbumError::EmptyUpdate));
    }

    // -----------------------------------------------------------------------
    // Photo CRUD
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn create_photo_under_unknown_parent_is_not_found() {
        let service = AlbumService::in_memory();
        let err = service
            .create_photo(&UserName::from_id("ghost").unwrap(), "x".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AlbumError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn delete_photo_then_get_is_not_found() {
        let (service, user) = seeded_service(1).await;
        let listing = service.list_photos(&user, "", None).await.unwrap();
        let name = listing.photos[0].name.clone();

        service.delete_photo(&name).await.unwrap();
        let err = service.get_photo(&name).await.unwrap_err();
        assert!(matches!(err, AlbumError::PhotoNotFound(_)));

        let err = service.delete_photo(&name).await.unwrap_err();
        assert!(matches!(err, AlbumError::PhotoNotFound(_)));
    }

    // -----------------------------------------------------------------------
    // Listing flow
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn pages_walk_a_25_photo_album() {
        let (service, user) = seeded_service(25).await;

        let page1 = service
            .list_photos(&user, "display_name", None)
            .await
            .unwrap();
        assert_eq!(page1.photos.len(), 10);
        assert_eq!(page1.photos[0].display_name, "photo 000");
        let token1 = page1.next_page_token.expect("more pages remain");

        let page2 = service
            .list_photos(&user, "display_name", Some(&token1))
            .await
            .unwrap();
        assert_eq!(page2.photos.len(), 10);
        assert_eq!(page2.photos[0].display_name, "photo 010");
        let token2 = page2.next_page_token.expect("more pages remain");

        let page3 = service
            .list_photos(&user, "display_name", Some(&token2))
            .await
            .unwrap();
        assert_eq!(page3.photos.len(), 5);
        assert_eq!(page3.photos[4].display_name, "photo 024");
        assert!(page3.next_page_token.is_none());
    }

    #[tokio::test]
    async fn token_resolution_is_stable() {
        let (service, user) = seeded_service(15).await;
        let token = service
            .list_photos(&user, "display_name", None)
            .await
            .unwrap()
            .next_page_token
            .unwrap();

        let first = service
            .list_photos(&user, "display_name", Some(&token))
            .await
            .unwrap();
        let second = service
            .list_photos(&user, "display_name", Some(&token))
            .await
            .unwrap();
        assert_eq!(first.photos, second.photos);
    }

    #[tokio::test]
    async fn repeated_fresh_listings_are_deterministic() {
        let (service, user) = seeded_service(8).await;
        for order in ["created_at", "display_name"] {
            let a = service.list_photos(&user, order, None).await.unwrap();
            let b = service.list_photos(&user, order, None).await.unwrap();
            assert_eq!(a.photos, b.photos);
        }
    }

    #[tokio::test]
    async fn unknown_order_key_falls_back_to_display_name() {
        let (service, user) = seeded_service(5).await;
        let fallback = service.list_photos(&user, "rating", None).await.unwrap();
        let by_name = service
            .list_photos(&user, "display_name", None)
            .await
            .unwrap();
        assert_eq!(fallback.photos, by_name.photos);
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let (service, user) = seeded_service(3).await;
        let err = service
            .list_photos(&user, "", Some("no-such-token"))
            .await
            .unwrap_err();
        assert!(matches!(err, AlbumError::TokenNotFound(_)));
    }

    #[tokio::test]
    async fn listing_unknown_scope_is_not_found() {
        let service = AlbumService::in_memory();
        let err = service
            .list_photos(&UserName::from_id("ghost").unwrap(), "", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AlbumError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn no_token_minted_for_single_page() {
        let (service, user) = seeded_service(4).await;
        let listing = service.list_photos(&user, "", None).await.unwrap();
        assert_eq!(listing.photos.len(), 4);
        assert!(listing.next_page_token.is_none());
        assert!(service.cursors().is_empty());
    }

    // -----------------------------------------------------------------------
    // Upload / download
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn upload_then_download_roundtrips_bytes() {
        let (service, user) = seeded_service(0).await;
        let name = PhotoName::mint(&user);
        let data = png_bytes(30_000);

        let rx = send_all(Chunk::split(&name, &data)).await;
        service.upload_photo(rx).await.unwrap();

        let (format, downloaded) = service.download_photo(&name).await.unwrap();
        assert_eq!(format, PhotoFormat::Png);
        assert_eq!(downloaded, data);
    }

    #[tokio::test]
    async fn corrupt_upload_commits_nothing() {
        let (service, user) = seeded_service(0).await;
        let name = PhotoName::mint(&user);
        let mut chunks = Chunk::split(&name, &png_bytes(1000));
        chunks[0].payload_digest = ContentDigest::of(b"someone else's block");

        let rx = send_all(chunks).await;
        let err = service.upload_photo(rx).await.unwrap_err();
        assert!(matches!(
            err,
            AlbumError::Ingest(IngestError::ChunkCorrupted { index: 0 })
        ));

        let err = service.download_photo(&name).await.unwrap_err();
        assert!(matches!(err, AlbumError::PhotoNotFound(_)));
    }

    #[tokio::test]
    async fn download_unknown_media_is_not_found() {
        let (service, user) = seeded_service(0).await;
        let err = service
            .download_photo(&PhotoName::mint(&user))
            .await
            .unwrap_err();
        assert!(matches!(err, AlbumError::PhotoNotFound(_)));
    }

    // -----------------------------------------------------------------------
    // Photo-echo stream
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn stream_echoes_lookups_in_order() {
        let (service, user) = seeded_service(2).await;
        let listing = service.list_photos(&user, "display_name", None).await.unwrap();
        let known = listing.photos[0].name.clone();
        let missing = PhotoName::from_ids("u-none", "p-none").unwrap();

        let (name_tx, name_rx) = mpsc::channel(4);
        let (result_tx, mut result_rx) = mpsc::channel(4);
        name_tx.send(known.clone()).await.unwrap();
        name_tx.send(missing.clone()).await.unwrap();
        drop(name_tx);

        service.stream_photos(name_rx, result_tx).await;

        let first = result_rx.recv().await.unwrap().unwrap();
        assert_eq!(first.name, known);
        let second = result_rx.recv().await.unwrap().unwrap_err();
        assert!(matches!(second, AlbumError::PhotoNotFound(_)));
        assert!(result_rx.recv().await.is_none());
    }
}
