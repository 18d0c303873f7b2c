//! Operational routes: tree reload and status.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use hlshost_core::{DeliveryMode, Error};
use hlshost_media::MasterPlaylist;

use crate::context::AppContext;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub generation: u64,
    pub media_playlists: usize,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub master_playlist: String,
    pub generation: u64,
    pub modes: Vec<DeliveryMode>,
    pub media_playlists: Vec<MediaPlaylistSummary>,
}

#[derive(Debug, Serialize)]
pub struct MediaPlaylistSummary {
    pub index: usize,
    pub path: String,
    pub segments: usize,
    pub total_duration_ms: f64,
    pub discontinuities: u64,
}

/// POST /reload
pub async fn reload(State(ctx): State<AppContext>) -> Result<Json<ReloadResponse>, AppError> {
    let store = ctx.store.clone();
    let master = tokio::task::spawn_blocking(move || store.reload())
        .await
        .map_err(|e| Error::Internal(format!("spawn_blocking join error: {e}")))??;

    Ok(Json(ReloadResponse {
        generation: ctx.store.generation(),
        media_playlists: master.media_playlists.len(),
    }))
}

/// GET /status
pub async fn status(State(ctx): State<AppContext>) -> Json<StatusResponse> {
    let master = ctx.store.snapshot();
    let modes: Vec<DeliveryMode> = DeliveryMode::ALL
        .into_iter()
        .filter(|&mode| ctx.config.mode_enabled(mode))
        .collect();

    Json(StatusResponse {
        master_playlist: ctx.store.master_path().display().to_string(),
        generation: ctx.store.generation(),
        modes,
        media_playlists: summarize(&master),
    })
}

fn summarize(master: &MasterPlaylist) -> Vec<MediaPlaylistSummary> {
    master
        .media_playlists
        .iter()
        .enumerate()
        .map(|(index, media)| MediaPlaylistSummary {
            index,
            path: media.path.display().to_string(),
            segments: media.segments.len(),
            total_duration_ms: media.total_duration_ms,
            discontinuities: media.total_discontinuity_count,
        })
        .collect()
}
