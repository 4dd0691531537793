//! duet-host library - the container application
//!
//! Owns the session and the authoritative song collection, resolves the
//! music library component from its remote deployment at runtime, and
//! composes it behind a failure boundary. The library module never sees
//! the session; it only receives a role, a snapshot, and action routes.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use duet_common::SharedSongStore;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod boundary;
pub mod registry;
pub mod session;
pub mod storage;

use registry::ComponentRegistry;
use session::SessionStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Current identity, mirrored to token storage
    pub session: Arc<SessionStore>,
    /// Authoritative song collection delegated to the library view
    pub store: SharedSongStore,
    /// Source of the runtime-loaded library component
    pub registry: Arc<dyn ComponentRegistry>,
}

/// Build application router
///
/// Mutation routes sit behind the admin gate; everything else is public.
pub fn build_router(state: AppState) -> Router {
    // Store mutations: the action routes the delegated view submits to
    let mutations = Router::new()
        .route("/api/songs", post(api::add_song))
        .route("/api/songs/:id", delete(api::delete_song))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api::admin_middleware,
        ));

    // Public routes (page, session, reads, fragment composition)
    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/api/session", get(api::get_session))
        .route("/api/session", post(api::credential_login))
        .route("/api/session", delete(api::logout))
        .route("/api/session/role", post(api::role_login))
        .route("/api/library/fragment", get(api::library_fragment))
        .route("/api/songs", get(api::list_songs))
        .merge(api::health_routes());

    // Combine routers
    Router::new()
        .merge(mutations)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
