//! Component render endpoint

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use duet_common::federation::RenderRequest;
use tracing::debug;

use crate::component::{LibraryMode, LibraryProps};
use crate::render::{render_library, ActionRoutes};
use crate::view::compose;
use crate::AppState;

/// POST /render
///
/// One render of the music library component. Delegated requests render
/// the snapshot they carry against the caller's mutation routes; anything
/// less renders the module's own store against the local routes.
pub async fn render_component(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Html<String> {
    let view = request.view.clone();
    let props = LibraryProps::from_request(request);
    debug!(
        role = %props.role,
        delegated = props.is_delegated(),
        "rendering library component"
    );
    let html = match &props.mode {
        LibraryMode::Delegated {
            songs,
            on_add,
            on_delete,
        } => render_library(
            props.role,
            &compose(songs, &view),
            &view,
            &ActionRoutes {
                add: on_add.clone(),
                delete: on_delete.clone(),
            },
        ),
        LibraryMode::Standalone => {
            let songs = state.store.snapshot().await;
            render_library(
                props.role,
                &compose(&songs, &view),
                &view,
                &ActionRoutes::local(),
            )
        }
    };
    Html(html)
}
