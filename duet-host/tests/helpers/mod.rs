//! Test helpers for duet-host integration tests
//!
//! Provides stub component registries (so API tests never touch the
//! network), a pre-wired test application over in-memory storage, and
//! small request/response helpers.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::Router;
use duet_common::federation::RenderRequest;
use duet_common::SharedSongStore;
use duet_host::registry::{Component, ComponentRegistry, RegistryError};
use duet_host::session::SessionStore;
use duet_host::storage::MemoryStorage;
use duet_host::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Render requests observed by a stub component, newest last
pub type RenderLog = Arc<Mutex<Vec<RenderRequest>>>;

/// Registry resolving to a component that records every render request
/// and emits a recognizable fragment
pub struct StubRegistry {
    component: Arc<StubComponent>,
}

impl StubRegistry {
    pub fn new() -> (Self, RenderLog) {
        let log: RenderLog = Arc::new(Mutex::new(Vec::new()));
        let registry = Self {
            component: Arc::new(StubComponent { log: log.clone() }),
        };
        (registry, log)
    }
}

#[async_trait]
impl ComponentRegistry for StubRegistry {
    async fn resolve(&self, _name: &str) -> Result<Arc<dyn Component>, RegistryError> {
        Ok(self.component.clone())
    }
}

struct StubComponent {
    log: RenderLog,
}

#[async_trait]
impl Component for StubComponent {
    async fn render(&self, request: &RenderRequest) -> Result<String, RegistryError> {
        let songs = request.songs.as_ref().map(Vec::len).unwrap_or(0);
        self.log.lock().await.push(request.clone());
        Ok(format!(
            "<div class=\"library\" data-stub=\"true\">stub fragment: {} songs</div>",
            songs
        ))
    }
}

/// Registry whose resolve always fails, like a dead remote deployment
pub struct UnreachableRegistry;

#[async_trait]
impl ComponentRegistry for UnreachableRegistry {
    async fn resolve(&self, _name: &str) -> Result<Arc<dyn Component>, RegistryError> {
        Err(RegistryError::EntryFetch(
            "connection refused (stub)".to_string(),
        ))
    }
}

/// Registry that resolves to a component whose render fails
pub struct BrokenComponentRegistry {
    /// Panic instead of returning an error when true
    pub panics: bool,
}

#[async_trait]
impl ComponentRegistry for BrokenComponentRegistry {
    async fn resolve(&self, _name: &str) -> Result<Arc<dyn Component>, RegistryError> {
        Ok(Arc::new(BrokenComponent {
            panics: self.panics,
        }))
    }
}

struct BrokenComponent {
    panics: bool,
}

#[async_trait]
impl Component for BrokenComponent {
    async fn render(&self, _request: &RenderRequest) -> Result<String, RegistryError> {
        if self.panics {
            panic!("stub component panicked during render");
        }
        Err(RegistryError::Render("stub render failure".to_string()))
    }
}

/// Application state over in-memory storage and the given registry
pub async fn test_state(registry: Arc<dyn ComponentRegistry>) -> AppState {
    AppState {
        session: Arc::new(SessionStore::restore(Box::new(MemoryStorage::new())).await),
        store: SharedSongStore::new(),
        registry,
    }
}

/// Router plus a handle on its state for direct inspection
pub async fn test_app(registry: Arc<dyn ComponentRegistry>) -> (Router, AppState) {
    let state = test_state(registry).await;
    (build_router(state.clone()), state)
}

/// Create request with empty body
pub fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Create request with JSON body
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Extract JSON body from response
pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Extract text body from response
pub async fn extract_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Should be UTF-8")
}
