//! duet-library - the music library module
//!
//! Deployed separately from the container that embeds it. Publishes a
//! remote entry manifest and a render endpoint for containers, and serves
//! its own standalone page backed by a local demo store for direct visits.

use axum::routing::{delete, get, post};
use axum::Router;
use duet_common::SharedSongStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod catalog;
pub mod component;
pub mod render;
pub mod view;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Standalone song store, seeded with the demo catalog
    pub store: SharedSongStore,
}

impl AppState {
    /// State with a freshly seeded standalone store
    pub fn new() -> Self {
        Self {
            store: SharedSongStore::seeded(catalog::demo_songs()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build application router
///
/// Everything is public: the module trusts its callers, and the container
/// is typically served from a different origin, so CORS is wide open.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::serve_index))
        .route("/static/library.js", get(api::serve_library_js))
        .route("/remote-entry.json", get(api::remote_entry))
        .route("/render", post(api::render_component))
        .route("/songs", post(api::add_song))
        .route("/songs/:id", delete(api::delete_song))
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
