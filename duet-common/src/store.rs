//! In-memory song collection store
//!
//! Both services keep their song collection in process memory: the container
//! owns the authoritative collection it hands to the library view, and the
//! library module keeps a local demo collection for standalone visits.
//! Collections are not persisted; a restart resets them to their seed.

use crate::model::{NewSong, Song};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Ordered song collection with id assignment
///
/// Insertion order is preserved; display ordering is the view layer's job.
#[derive(Debug, Default)]
pub struct SongStore {
    songs: Vec<Song>,
}

impl SongStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated from seed data, ids assigned in iteration order
    pub fn seeded<I>(seed: I) -> Self
    where
        I: IntoIterator<Item = NewSong>,
    {
        let mut store = Self::new();
        for song in seed {
            store.add(song);
        }
        store
    }

    /// Append a song, assigning it a fresh unique id
    pub fn add(&mut self, data: NewSong) -> Song {
        let song = Song {
            id: Uuid::new_v4().to_string(),
            title: data.title,
            artist: data.artist,
            album: data.album,
        };
        self.songs.push(song.clone());
        song
    }

    /// Remove a song by id; removing an absent id is a no-op
    ///
    /// Returns whether a song was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.songs.len();
        self.songs.retain(|song| song.id != id);
        self.songs.len() != before
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

/// Shared handle to a song store, cloneable across handlers
#[derive(Debug, Clone, Default)]
pub struct SharedSongStore {
    inner: Arc<RwLock<SongStore>>,
}

impl SharedSongStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded<I>(seed: I) -> Self
    where
        I: IntoIterator<Item = NewSong>,
    {
        Self {
            inner: Arc::new(RwLock::new(SongStore::seeded(seed))),
        }
    }

    pub async fn add(&self, data: NewSong) -> Song {
        self.inner.write().await.add(data)
    }

    pub async fn remove(&self, id: &str) -> bool {
        self.inner.write().await.remove(id)
    }

    /// Point-in-time copy of the collection, in insertion order
    pub async fn snapshot(&self) -> Vec<Song> {
        self.inner.read().await.songs().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
