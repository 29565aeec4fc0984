use std::sync::Arc;

use shutter_album::AlbumService;
use shutter_store::{FsMediaStore, InMemoryAlbumStore};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router;
use crate::AppState;

/// Shutter HTTP server.
pub struct AlbumServer {
    config: ServerConfig,
}

impl AlbumServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Wire the service over its configured backends.
    fn build_state(&self) -> ServerResult<AppState> {
        let media = Arc::new(FsMediaStore::open(&self.config.media_root)?);
        let album = AlbumService::new(Arc::new(InMemoryAlbumStore::new()), media)
            .with_page_size(self.config.page_size);
        Ok(AppState {
            album: Arc::new(album),
            upload_channel_capacity: self.config.upload_channel_capacity,
        })
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        Ok(build_router(self.build_state()?))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = build_router(self.build_state()?);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("Shutter server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| crate::error::ServerError::Internal(e.to_string()))
    }
}
