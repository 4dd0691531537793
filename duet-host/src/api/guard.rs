//! Role gate for store mutation routes
//!
//! The rendered view only offers mutation controls to admins, but the
//! routes they submit to are reachable by anything that speaks HTTP, so
//! the same rule is enforced here: no session means 401, a non-admin
//! session means 403.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use duet_common::Role;
use serde_json::json;
use tracing::warn;

use crate::AppState;

/// Admin gate middleware
///
/// Applied to the mutation routes only; reads and session routes stay
/// public.
pub async fn admin_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, GuardError> {
    match state.session.role().await {
        Some(Role::Admin) => Ok(next.run(request).await),
        Some(role) => {
            warn!(%role, uri = %request.uri(), "Rejected mutation from non-admin session");
            Err(GuardError::Forbidden(role))
        }
        None => Err(GuardError::Unauthorized),
    }
}

/// Gate errors for HTTP responses
#[derive(Debug)]
pub enum GuardError {
    Unauthorized,
    Forbidden(Role),
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            GuardError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Sign in required".to_string())
            }
            GuardError::Forbidden(role) => (
                StatusCode::FORBIDDEN,
                format!("Admin role required; current role is {}", role),
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
