//! Host store endpoints
//!
//! The authoritative collection the delegated library view renders. The
//! mutation routes double as the view's action routes: the rendered add
//! form and delete buttons submit straight here. Admin gating happens in
//! the router layer, not in these handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use duet_common::{NewSong, Song};
use serde::Serialize;
use tracing::info;

use crate::AppState;

/// Snapshot of the host collection
#[derive(Debug, Serialize)]
pub struct SongsResponse {
    pub count: usize,
    pub songs: Vec<Song>,
}

/// GET /api/songs
///
/// Read-only snapshot in insertion order; feeds the store-debug card.
pub async fn list_songs(State(state): State<AppState>) -> Json<SongsResponse> {
    let songs = state.store.snapshot().await;
    Json(SongsResponse {
        count: songs.len(),
        songs,
    })
}

/// POST /api/songs
pub async fn add_song(
    State(state): State<AppState>,
    Json(data): Json<NewSong>,
) -> (StatusCode, Json<Song>) {
    let song = state.store.add(data).await;
    info!(id = %song.id, title = %song.title, "Added song to host store");
    (StatusCode::CREATED, Json(song))
}

/// DELETE /api/songs/:id
///
/// Deleting an id that is already gone still answers 204; the outcome
/// (the id is absent) holds either way.
pub async fn delete_song(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    let removed = state.store.remove(&id).await;
    if removed {
        info!(id = %id, "Deleted song from host store");
    }
    StatusCode::NO_CONTENT
}
