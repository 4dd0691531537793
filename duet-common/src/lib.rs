//! # Duet Common Library
//!
//! Shared code for the Duet container and library services including:
//! - Domain model (songs, roles, view queries)
//! - In-memory song collection store
//! - Demo token codec and seeded credentials
//! - Federation wire contract
//! - Configuration loading

pub mod auth;
pub mod config;
pub mod error;
pub mod federation;
pub mod model;
pub mod store;

pub use error::{Error, Result};
pub use model::{NewSong, Role, Song, SongField, ViewQuery};
pub use store::{SharedSongStore, SongStore};
