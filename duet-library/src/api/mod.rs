//! HTTP API handlers for duet-library

pub mod entry;
pub mod health;
pub mod render;
pub mod songs;
pub mod ui;

pub use entry::remote_entry;
pub use health::health_routes;
pub use render::render_component;
pub use songs::{add_song, delete_song};
pub use ui::{serve_index, serve_library_js};
