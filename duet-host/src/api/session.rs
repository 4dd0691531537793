//! Session endpoints
//!
//! Login, logout, and the current-identity view the container page polls.
//! Both login paths exist: the quick role buttons and the credential form.
//! A failed credential login answers 401 with an inline-displayable
//! message and leaves the session untouched.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use duet_common::auth::TokenPayload;
use duet_common::Role;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::AppState;

/// Current session as reported to the page
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    /// Role of the signed-in account; null while anonymous
    pub role: Option<Role>,
    /// Signed-in account, or null while anonymous
    pub user: Option<SessionUser>,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SessionInfo {
    fn from_identity(identity: Option<TokenPayload>) -> Self {
        match identity {
            Some(payload) => Self {
                role: Some(payload.role),
                user: Some(SessionUser {
                    email: payload.sub,
                    name: payload.name,
                }),
            },
            None => Self {
                role: None,
                user: None,
            },
        }
    }
}

/// Credential login request body
#[derive(Debug, Deserialize)]
pub struct CredentialLogin {
    pub email: String,
    pub password: String,
}

/// Quick role login request body
#[derive(Debug, Deserialize)]
pub struct RoleLogin {
    pub role: Role,
}

/// GET /api/session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionInfo> {
    Json(SessionInfo::from_identity(state.session.identity().await))
}

/// POST /api/session
///
/// Credential login. 401 on a bad pair; retry is just resubmitting.
pub async fn credential_login(
    State(state): State<AppState>,
    Json(credentials): Json<CredentialLogin>,
) -> Result<Json<SessionInfo>, SessionError> {
    if !state
        .session
        .login_with_credentials(&credentials.email, &credentials.password)
        .await
    {
        return Err(SessionError::InvalidCredentials);
    }
    Ok(Json(SessionInfo::from_identity(
        state.session.identity().await,
    )))
}

/// POST /api/session/role
///
/// Quick login as the seeded account for a role; cannot fail.
pub async fn role_login(
    State(state): State<AppState>,
    Json(request): Json<RoleLogin>,
) -> Json<SessionInfo> {
    state.session.login(request.role).await;
    Json(SessionInfo::from_identity(state.session.identity().await))
}

/// DELETE /api/session
pub async fn logout(State(state): State<AppState>) -> Json<SessionInfo> {
    state.session.logout().await;
    Json(SessionInfo::from_identity(None))
}

/// Session API errors
#[derive(Debug)]
pub enum SessionError {
    InvalidCredentials,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SessionError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
