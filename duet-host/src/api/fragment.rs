//! Library fragment composition
//!
//! The page asks for the library view here; the handler resolves the
//! remote component, hands it the session role, the host collection, and
//! the host mutation routes, and returns whatever the boundary lets
//! through. Always 200: a failed composition is the diagnostic card, not
//! an error status, because the failure is contained to this subtree.

use axum::extract::{Query, State};
use axum::response::Html;
use duet_common::federation::{RenderRequest, LIBRARY_COMPONENT, LIBRARY_MODULE};
use duet_common::ViewQuery;

use crate::boundary::FailureBoundary;
use crate::registry::RegistryError;
use crate::AppState;

/// Route the delegated add form submits to
pub const ADD_ROUTE: &str = "/api/songs";

/// Route the delegated delete buttons submit to; "{id}" is per-song
pub const DELETE_ROUTE: &str = "/api/songs/{id}";

/// GET /api/library/fragment
///
/// One composition of the library subtree inside a fresh boundary.
pub async fn library_fragment(
    State(state): State<AppState>,
    Query(view): Query<ViewQuery>,
) -> Html<String> {
    let mut boundary = FailureBoundary::new();
    let html = boundary.compose(compose_library(&state, view)).await;
    Html(html)
}

/// Resolve the remote component and render it against the host state
///
/// The request carries all three delegation fields, so a healthy remote
/// always renders in delegated mode. The session role passes through
/// unresolved; an anonymous session renders as a plain user on the
/// component side.
async fn compose_library(state: &AppState, view: ViewQuery) -> Result<String, RegistryError> {
    let name = format!("{}/{}", LIBRARY_MODULE, LIBRARY_COMPONENT);
    let component = state.registry.resolve(&name).await?;
    let request = RenderRequest {
        role: state.session.role().await,
        songs: Some(state.store.snapshot().await),
        on_add: Some(ADD_ROUTE.to_string()),
        on_delete: Some(DELETE_ROUTE.to_string()),
        view,
    };
    component.render(&request).await
}
