//! Demo token codec and seeded credentials
//!
//! Purely illustrative authentication: tokens look like JWTs (two base64
//! JSON segments and a signature segment) but carry a constant fake
//! signature that is never produced or checked cryptographically. Nothing
//! here is a security boundary; the role in the payload only drives what
//! the UI offers.

use crate::error::Result;
use crate::model::Role;
use chrono::Utc;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Storage key the encoded token is persisted under
pub const TOKEN_STORAGE_KEY: &str = "auth_token_v1";

/// Constant stand-in for a real signature segment
const SIGNATURE: &str = "demo-sign";

// ========================================
// Token payload
// ========================================

/// Claims carried by a demo token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Subject: the normalized account email
    pub sub: String,
    pub role: Role,
    /// Display name, when the account has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued-at, Unix epoch milliseconds
    pub iat: i64,
}

impl TokenPayload {
    /// A payload issued now
    pub fn new(sub: impl Into<String>, role: Role, name: Option<impl Into<String>>) -> Self {
        Self {
            sub: sub.into(),
            role,
            name: name.map(Into::into),
            iat: Utc::now().timestamp_millis(),
        }
    }
}

// ========================================
// Encoding and decoding
// ========================================

/// Encode a payload as `base64(header).base64(payload).demo-sign`
///
/// The header is a fixed `{"alg":"none","typ":"JWT"}`.
///
/// # Examples
///
/// ```
/// use duet_common::auth::{decode_token, encode_token, TokenPayload};
/// use duet_common::Role;
///
/// let payload = TokenPayload::new("user@demo.com", Role::User, Some("User"));
/// let token = encode_token(&payload).unwrap();
/// assert_eq!(token.matches('.').count(), 2);
/// assert_eq!(decode_token(&token), Some(payload));
/// ```
pub fn encode_token(payload: &TokenPayload) -> Result<String> {
    let header = serde_json::json!({ "alg": "none", "typ": "JWT" });
    let header_b64 = base64::encode(serde_json::to_string(&header)?);
    let payload_b64 = base64::encode(serde_json::to_string(payload)?);
    Ok(format!("{}.{}.{}", header_b64, payload_b64, SIGNATURE))
}

/// Decode the payload segment of a token
///
/// Forgiving by design: anything that does not yield a payload (fewer than
/// two segments, bad base64, bad JSON) decodes to `None`. The header and
/// signature segments are ignored entirely.
pub fn decode_token(token: &str) -> Option<TokenPayload> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    let bytes = base64::decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

// ========================================
// Seeded demo accounts
// ========================================

/// A seeded account's credentials and identity
#[derive(Debug, Clone)]
struct CredentialRecord {
    password: &'static str,
    role: Role,
    name: &'static str,
}

static DEMO_USERS: Lazy<HashMap<&'static str, CredentialRecord>> = Lazy::new(|| {
    HashMap::from([
        (
            "admin@demo.com",
            CredentialRecord {
                password: "admin123",
                role: Role::Admin,
                name: "Admin",
            },
        ),
        (
            "user@demo.com",
            CredentialRecord {
                password: "user123",
                role: Role::User,
                name: "User",
            },
        ),
    ])
});

/// Check a credential pair against the seeded accounts
///
/// The email is trimmed and lowercased before lookup; the password is
/// compared exactly. Returns the issued payload on success.
pub fn authenticate(email: &str, password: &str) -> Option<TokenPayload> {
    let normalized = email.trim().to_lowercase();
    let record = DEMO_USERS.get(normalized.as_str())?;
    if record.password != password {
        return None;
    }
    Some(TokenPayload::new(
        normalized,
        record.role,
        Some(record.name),
    ))
}

/// The identity behind the quick role-login buttons
pub fn demo_identity(role: Role) -> TokenPayload {
    let (email, name) = match role {
        Role::Admin => ("admin@demo.com", "Admin"),
        Role::User => ("user@demo.com", "User"),
    };
    TokenPayload::new(email, role, Some(name))
}
