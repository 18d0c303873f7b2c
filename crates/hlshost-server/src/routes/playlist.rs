//! Playlist and segment route handlers.
//!
//! Every mode shares the same URL scheme:
//!
//! - `/{mode}/playlist.m3u8` - master playlist
//! - `/{mode}/{index}/playlist.m3u8` - media playlist `index`
//! - `/{mode}/{index}/{segment}.{ext}` - segment `segment` of media playlist `index`

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use hlshost_core::{segment_mime_type, DeliveryMode, Error, PLAYLIST_MIME_TYPE};

use crate::context::AppContext;
use crate::error::AppError;

/// GET /{mode}/playlist.m3u8
pub async fn master_playlist(
    State(ctx): State<AppContext>,
    Path(mode): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mode: DeliveryMode = mode.parse()?;
    let body = ctx.loader(mode)?.load_master_playlist()?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, PLAYLIST_MIME_TYPE),
            (header::CACHE_CONTROL, mode.playlist_cache_control()),
        ],
        body,
    ))
}

/// GET /{mode}/{index}/playlist.m3u8
pub async fn media_playlist(
    State(ctx): State<AppContext>,
    Path((mode, index)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let mode: DeliveryMode = mode.parse()?;
    let loader = ctx.loader(mode)?;
    let index = parse_index("media playlist index", &index)?;
    let body = loader.load_media_playlist(index)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, PLAYLIST_MIME_TYPE),
            (header::CACHE_CONTROL, mode.playlist_cache_control()),
        ],
        body,
    ))
}

/// GET /{mode}/{index}/{segment}
///
/// The content type comes from the requested name, so an unsupported suffix
/// is rejected before any disk access.
pub async fn segment(
    State(ctx): State<AppContext>,
    Path((mode, index, segment)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let mode: DeliveryMode = mode.parse()?;
    let loader = ctx.loader(mode)?;
    let media_index = parse_index("media playlist index", &index)?;
    let content_type = segment_mime_type(&segment)?;
    let segment_index = parse_index("segment index", segment_stem(&segment))?;

    let body = tokio::task::spawn_blocking(move || loader.load_segment(media_index, segment_index))
        .await
        .map_err(|e| Error::Internal(format!("spawn_blocking join error: {e}")))??;

    tracing::trace!(%mode, media_index, segment_index, bytes = body.len(), "Served segment");

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body))
}

/// Part of `name` before the last `.`.
fn segment_stem(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(stem, _ext)| stem)
}

fn parse_index(what: &str, value: &str) -> Result<usize, Error> {
    value
        .parse::<usize>()
        .map_err(|_| Error::Validation(format!("invalid {what} '{value}'")))
}
