//! Standalone store mutation endpoints
//!
//! Used only by the standalone page; a container never touches this store.
//! The standalone page trusts its own role toggle, so there is no gate
//! here beyond what the rendered controls offer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use duet_common::{NewSong, Song};
use tracing::info;

use crate::AppState;

/// POST /songs
pub async fn add_song(
    State(state): State<AppState>,
    Json(data): Json<NewSong>,
) -> (StatusCode, Json<Song>) {
    let song = state.store.add(data).await;
    info!(id = %song.id, title = %song.title, "added song to standalone store");
    (StatusCode::CREATED, Json(song))
}

/// DELETE /songs/:id
///
/// Deleting an id that is already gone is a success; the outcome (the id
/// is absent) holds either way.
pub async fn delete_song(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    let removed = state.store.remove(&id).await;
    if removed {
        info!(id = %id, "deleted song from standalone store");
    }
    StatusCode::NO_CONTENT
}
