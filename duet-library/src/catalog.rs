//! Seed catalog for the standalone library store
//!
//! Loaded on startup and on every restart; standalone edits are never
//! persisted. Deliberately varied: repeated artists and albums so the
//! grouped views have something to show.

use duet_common::NewSong;

/// Demo songs the standalone store starts with
pub fn demo_songs() -> Vec<NewSong> {
    vec![
        NewSong::new("Bohemian Rhapsody", "Queen", "A Night at the Opera"),
        NewSong::new("Love of My Life", "Queen", "A Night at the Opera"),
        NewSong::new("Come Together", "The Beatles", "Abbey Road"),
        NewSong::new("Something", "The Beatles", "Abbey Road"),
        NewSong::new("Billie Jean", "Michael Jackson", "Thriller"),
        NewSong::new("Smells Like Teen Spirit", "Nirvana", "Nevermind"),
        NewSong::new("Rolling in the Deep", "Adele", "21"),
        NewSong::new("Hotel California", "Eagles", "Hotel California"),
    ]
}
