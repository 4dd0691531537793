//! HTTP API handlers for duet-host

pub mod fragment;
pub mod guard;
pub mod health;
pub mod session;
pub mod songs;
pub mod ui;

pub use fragment::library_fragment;
pub use guard::admin_middleware;
pub use health::health_routes;
pub use session::{credential_login, get_session, logout, role_login};
pub use songs::{add_song, delete_song, list_songs};
pub use ui::{serve_app_js, serve_index};
