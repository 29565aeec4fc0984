use std::convert::Infallible;

use axum::body::{Body, Bytes};
use axum::extract::{Path, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::{Buf, BytesMut};
use serde_json::json;
use shutter_protocol::{
    ChunkCodec, CreatePhotoRequest, CreateUserRequest, HealthResponse, ListPhotosQuery,
    ListPhotosResponse, PhotoEvent, ProtocolError, StreamPhotosRequest,
};
use shutter_types::{Photo, PhotoName, User, UserName, UserPatch};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

use crate::error::{fault_for, ApiError};
use crate::AppState;

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "shutter-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.album.create_user(body.display_name).await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let name = UserName::from_id(&user_id)?;
    Ok(Json(state.album.get_user(&name).await?))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>, ApiError> {
    let name = UserName::from_id(&user_id)?;
    Ok(Json(state.album.update_user(&name, patch).await?))
}

pub async fn create_photo(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<CreatePhotoRequest>,
) -> Result<Json<Photo>, ApiError> {
    let parent = UserName::from_id(&user_id)?;
    Ok(Json(state.album.create_photo(&parent, body.display_name).await?))
}

pub async fn list_photos(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ListPhotosQuery>,
) -> Result<Json<ListPhotosResponse>, ApiError> {
    let parent = UserName::from_id(&user_id)?;
    let listing = state
        .album
        .list_photos(
            &parent,
            query.order_by.as_deref().unwrap_or_default(),
            query.page_token.as_deref(),
        )
        .await?;
    Ok(Json(ListPhotosResponse {
        photos: listing.photos,
        next_page_token: listing.next_page_token,
    }))
}

pub async fn get_photo(
    State(state): State<AppState>,
    Path((user_id, photo_id)): Path<(String, String)>,
) -> Result<Json<Photo>, ApiError> {
    let name = PhotoName::from_ids(&user_id, &photo_id)?;
    Ok(Json(state.album.get_photo(&name).await?))
}

pub async fn delete_photo(
    State(state): State<AppState>,
    Path((user_id, photo_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let name = PhotoName::from_ids(&user_id, &photo_id)?;
    state.album.delete_photo(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn download_photo(
    State(state): State<AppState>,
    Path((user_id, photo_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let name = PhotoName::from_ids(&user_id, &photo_id)?;
    let (format, data) = state.album.download_photo(&name).await?;
    Ok(([(header::CONTENT_TYPE, format.mime_type())], data).into_response())
}

/// Streaming upload ingress.
///
/// The body is a sequence of framed chunks. Frames are decoded as they
/// arrive and fed into a bounded channel; the assembler task pulls from
/// the other end, so a slow assembler backpressures the client through
/// the channel and the socket. A decode failure stops feeding, which
/// closes the channel and discards the assembler's buffered state.
pub async fn upload_photo(
    State(state): State<AppState>,
    request: Request,
) -> Result<StatusCode, ApiError> {
    let album = state.album.clone();
    let (tx, rx) = mpsc::channel(state.upload_channel_capacity);
    let assembly = tokio::spawn(async move { album.upload_photo(rx).await });

    let mut body = request.into_body().into_data_stream();
    let mut buf = BytesMut::new();
    let mut ingress: Result<(), ApiError> = Ok(());

    'feed: while let Some(piece) = body.next().await {
        match piece {
            Ok(piece) => buf.extend_from_slice(&piece),
            Err(e) => {
                ingress = Err(ApiError::Transport(e.to_string()));
                break 'feed;
            }
        }
        loop {
            match ChunkCodec::decode(&buf) {
                Ok(Some((chunk, consumed))) => {
                    buf.advance(consumed);
                    if tx.send(chunk).await.is_err() {
                        // Assembler bailed; its error is authoritative.
                        break 'feed;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    ingress = Err(e.into());
                    break 'feed;
                }
            }
        }
    }
    drop(tx);

    let result = assembly
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    ingress?;
    result?;
    if !buf.is_empty() {
        return Err(ProtocolError::FramingError("trailing bytes after final frame".into()).into());
    }
    Ok(StatusCode::OK)
}

/// Photo-echo stream.
///
/// Looks up each requested name and streams the results back as
/// newline-delimited JSON, produced through a bounded channel so a slow
/// reader backpressures the lookups.
pub async fn stream_photos(
    State(state): State<AppState>,
    Json(body): Json<StreamPhotosRequest>,
) -> Result<Response, ApiError> {
    let mut names = Vec::with_capacity(body.names.len());
    for raw in &body.names {
        names.push(PhotoName::parse(raw)?);
    }

    let (name_tx, name_rx) = mpsc::channel(8);
    let (result_tx, mut result_rx) = mpsc::channel(8);
    let album = state.album.clone();
    tokio::spawn(async move { album.stream_photos(name_rx, result_tx).await });
    tokio::spawn(async move {
        for name in names {
            if name_tx.send(name).await.is_err() {
                break;
            }
        }
    });

    let (line_tx, line_rx) = mpsc::channel::<Result<Bytes, Infallible>>(8);
    tokio::spawn(async move {
        while let Some(result) = result_rx.recv().await {
            let event = match result {
                Ok(photo) => PhotoEvent::Photo(photo),
                Err(err) => PhotoEvent::Fault(fault_for(&err).1),
            };
            let Ok(mut line) = serde_json::to_vec(&event) else {
                break;
            };
            line.push(b'\n');
            if line_tx.send(Ok(Bytes::from(line))).await.is_err() {
                break;
            }
        }
    });

    let stream_body = Body::from_stream(ReceiverStream::new(line_rx));
    Ok((
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        stream_body,
    )
        .into_response())
}
