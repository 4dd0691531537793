//! Integration tests for duet-library API endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - Remote entry manifest shape
//! - Component rendering in standalone and delegated mode
//! - Mode fallback when delegation fields are incomplete
//! - View state (filter/sort/group) flowing through a render
//! - Standalone store mutations

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use duet_library::{build_router, AppState};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: Create app plus a handle on its state for store inspection
fn setup_app() -> (axum::Router, AppState) {
    let state = AppState::new();
    (build_router(state.clone()), state)
}

/// Test helper: Create request with empty body
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Create request with JSON body
fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: Extract text body from response
async fn extract_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Should be UTF-8")
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = setup_app();

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "duet-library");
    assert!(body["version"].is_string());
}

// =============================================================================
// Remote Entry Manifest Tests
// =============================================================================

#[tokio::test]
async fn test_remote_entry_manifest() {
    let (app, _) = setup_app();

    let response = app
        .oneshot(test_request("GET", "/remote-entry.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["module"], "duet-library");
    assert_eq!(body["federation"], 1);
    assert!(body["version"].is_string());
    let exposes = body["exposes"].as_array().unwrap();
    assert!(exposes.contains(&Value::String("music-library".to_string())));
}

#[tokio::test]
async fn test_remote_entry_allows_cross_origin_reads() {
    let (app, _) = setup_app();

    let request = Request::builder()
        .method("GET")
        .uri("/remote-entry.json")
        .header("origin", "http://127.0.0.1:5173")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

// =============================================================================
// Component Render Tests - Standalone Mode
// =============================================================================

#[tokio::test]
async fn test_render_without_fields_is_standalone_user() {
    let (app, _) = setup_app();

    let response = app
        .oneshot(json_request("POST", "/render", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Music Library"));
    // Standalone mode renders the seeded demo catalog
    assert!(html.contains("Bohemian Rhapsody"));
    // Anonymous/plain-user render carries no mutation controls
    assert!(!html.contains("add-form"));
    assert!(!html.contains("delete-btn"));
}

#[tokio::test]
async fn test_standalone_admin_targets_local_routes() {
    let (app, _) = setup_app();

    let response = app
        .oneshot(json_request("POST", "/render", json!({"role": "admin"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("action=\"/songs\""));
    assert!(html.contains("data-action=\"/songs/"));
}

// =============================================================================
// Component Render Tests - Delegated Mode
// =============================================================================

fn delegated_request(role: &str, songs: Value, view: Value) -> Value {
    json!({
        "role": role,
        "songs": songs,
        "on_add": "/api/songs",
        "on_delete": "/api/songs/{id}",
        "view": view,
    })
}

#[tokio::test]
async fn test_delegated_render_uses_supplied_snapshot() {
    let (app, _) = setup_app();

    let songs = json!([
        {"id": "host-1", "title": "Host Song", "artist": "Host Artist", "album": "Host Album"}
    ]);
    let response = app
        .oneshot(json_request(
            "POST",
            "/render",
            delegated_request("admin", songs, json!({})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Host Song"));
    // The module's own catalog must not leak into a delegated render
    assert!(!html.contains("Bohemian Rhapsody"));
    // Mutation controls point at the caller's routes
    assert!(html.contains("action=\"/api/songs\""));
    assert!(html.contains("data-action=\"/api/songs/host-1\""));
}

#[tokio::test]
async fn test_delegated_render_of_empty_snapshot() {
    let (app, _) = setup_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/render",
            delegated_request("user", json!([]), json!({})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    // An empty snapshot renders empty; it must not fall back to the catalog
    assert!(html.contains("No songs found"));
    assert!(!html.contains("Bohemian Rhapsody"));
}

#[tokio::test]
async fn test_partial_delegation_falls_back_to_standalone() {
    let (app, _) = setup_app();

    // Songs supplied but mutation routes missing
    let body = json!({
        "role": "user",
        "songs": [
            {"id": "host-1", "title": "Host Song", "artist": "Host Artist", "album": ""}
        ],
    });
    let response = app
        .oneshot(json_request("POST", "/render", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Bohemian Rhapsody"));
    assert!(!html.contains("Host Song"));
}

// =============================================================================
// View State Tests
// =============================================================================

#[tokio::test]
async fn test_view_filtering_flows_through_render() {
    let (app, _) = setup_app();

    let songs = json!([
        {"id": "1", "title": "Waterloo", "artist": "Abba", "album": "Waterloo"},
        {"id": "2", "title": "Let It Be", "artist": "The Beatles", "album": "Let It Be"}
    ]);
    let view = json!({"search": "be", "filter_by": "artist"});
    let response = app
        .oneshot(json_request(
            "POST",
            "/render",
            delegated_request("user", songs, view),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Let It Be"));
    assert!(!html.contains("Waterloo"));
    // The search box keeps its value across the round trip
    assert!(html.contains("value=\"be\""));
}

#[tokio::test]
async fn test_view_grouping_flows_through_render() {
    let (app, _) = setup_app();

    let songs = json!([
        {"id": "1", "title": "A", "artist": "X", "album": "Z"},
        {"id": "2", "title": "B", "artist": "Y", "album": "Z"}
    ]);
    let view = json!({"group_by": "album"});
    let response = app
        .oneshot(json_request(
            "POST",
            "/render",
            delegated_request("user", songs, view),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("<h3>album: Z (2)</h3>"));
}

#[tokio::test]
async fn test_render_rejects_unknown_view_field() {
    let (app, _) = setup_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/render",
            json!({"view": {"group_by": "label"}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// Standalone Store Mutation Tests
// =============================================================================

#[tokio::test]
async fn test_add_song_to_standalone_store() {
    let (app, state) = setup_app();
    let before = state.store.len().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/songs",
            json!({"title": "New One", "artist": "Someone", "album": ""}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["title"], "New One");
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(state.store.len().await, before + 1);
}

#[tokio::test]
async fn test_delete_song_is_idempotent() {
    let (app, state) = setup_app();

    let song = state
        .store
        .add(duet_common::NewSong::new("Doomed", "Nobody", ""))
        .await;
    let before = state.store.len().await;
    let uri = format!("/songs/{}", song.id);

    let response = app
        .clone()
        .oneshot(test_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(state.store.len().await, before - 1);

    // Deleting the same id again succeeds and changes nothing
    let response = app.oneshot(test_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(state.store.len().await, before - 1);
}

#[tokio::test]
async fn test_added_song_appears_in_next_standalone_render() {
    let (app, _) = setup_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/songs",
            json!({"title": "Freshly Added", "artist": "Tester"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request("POST", "/render", json!({})))
        .await
        .unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Freshly Added"));
}
