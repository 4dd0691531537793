//! Standalone page serving
//!
//! The module is a complete little app on its own: visiting it directly
//! serves a shell page whose script drives the same render endpoint the
//! container uses, minus the delegation fields.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("../ui/index.html");
const LIBRARY_JS: &str = include_str!("../ui/library.js");

/// GET /
///
/// Serves the standalone page shell
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /static/library.js
///
/// Serves the standalone page script
pub async fn serve_library_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        LIBRARY_JS,
    )
        .into_response()
}
