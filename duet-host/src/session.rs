//! Container session state
//!
//! One session per running container (it is a single-user demo). The
//! current identity lives in memory; every change is mirrored to token
//! storage as an encoded demo token, and startup restores whatever
//! decodes from storage. A missing, malformed, or unreadable token just
//! means the session starts anonymous.

use duet_common::auth::{self, TokenPayload, TOKEN_STORAGE_KEY};
use duet_common::Role;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::storage::TokenStorage;

/// The container's authenticated identity, if any
pub struct SessionStore {
    payload: RwLock<Option<TokenPayload>>,
    storage: Box<dyn TokenStorage>,
}

impl SessionStore {
    /// Build the store, restoring a persisted session when one decodes
    pub async fn restore(storage: Box<dyn TokenStorage>) -> Self {
        let payload = match storage.get(TOKEN_STORAGE_KEY).await {
            Ok(Some(raw)) => {
                let decoded = auth::decode_token(&raw);
                if decoded.is_none() {
                    warn!("Persisted token did not decode; starting anonymous");
                }
                decoded
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read persisted token: {}; starting anonymous", e);
                None
            }
        };
        if let Some(p) = &payload {
            info!(sub = %p.sub, role = %p.role, "Restored session from storage");
        }
        Self {
            payload: RwLock::new(payload),
            storage,
        }
    }

    /// Quick login as the seeded identity for a role; always succeeds
    pub async fn login(&self, role: Role) {
        self.set(Some(auth::demo_identity(role))).await;
    }

    /// Credential login; returns whether the pair matched a seeded account
    pub async fn login_with_credentials(&self, email: &str, password: &str) -> bool {
        match auth::authenticate(email, password) {
            Some(payload) => {
                info!(sub = %payload.sub, role = %payload.role, "Credential login");
                self.set(Some(payload)).await;
                true
            }
            None => false,
        }
    }

    pub async fn logout(&self) {
        self.set(None).await;
    }

    pub async fn identity(&self) -> Option<TokenPayload> {
        self.payload.read().await.clone()
    }

    pub async fn role(&self) -> Option<Role> {
        self.payload.read().await.as_ref().map(|p| p.role)
    }

    /// Replace the identity and mirror the change to storage
    ///
    /// Persistence failures are logged and swallowed: the in-memory
    /// session keeps working, it just will not survive a restart.
    async fn set(&self, payload: Option<TokenPayload>) {
        *self.payload.write().await = payload.clone();
        let result = match &payload {
            Some(p) => match auth::encode_token(p) {
                Ok(token) => self.storage.put(TOKEN_STORAGE_KEY, &token).await,
                Err(e) => Err(e),
            },
            None => self.storage.remove(TOKEN_STORAGE_KEY).await,
        };
        if let Err(e) = result {
            warn!("Failed to persist session change: {}", e);
        }
    }
}
