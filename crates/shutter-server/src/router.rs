use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::AppState;

/// Build the axum router with all Shutter endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/users", post(handler::create_user))
        .route(
            "/v1/users/:user_id",
            get(handler::get_user).patch(handler::update_user),
        )
        .route(
            "/v1/users/:user_id/photos",
            get(handler::list_photos).post(handler::create_photo),
        )
        .route(
            "/v1/users/:user_id/photos/:photo_id",
            get(handler::get_photo).delete(handler::delete_photo),
        )
        .route(
            "/v1/users/:user_id/photos/:photo_id/media",
            get(handler::download_photo),
        )
        .route("/v1/upload", post(handler::upload_photo))
        .route("/v1/photos/stream", post(handler::stream_photos))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
