//! View composition: filter, sort, and group a song collection
//!
//! Pure functions from a collection snapshot and a view query to the
//! listing structure the renderer walks. Order of operations is fixed:
//! filter narrows, sort orders, grouping (when requested) partitions the
//! already-sorted rows.

use duet_common::{Song, SongField, ViewQuery};
use std::collections::HashMap;

/// Songs sharing one exact value of the grouping field
#[derive(Debug, Clone, PartialEq)]
pub struct SongGroup {
    /// The shared field value, verbatim (grouping does not case-fold)
    pub key: String,
    pub songs: Vec<Song>,
}

/// A composed listing, ready to render
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Flat(Vec<Song>),
    Grouped {
        field: SongField,
        groups: Vec<SongGroup>,
    },
}

impl Listing {
    /// Total number of songs across the listing
    pub fn len(&self) -> usize {
        match self {
            Listing::Flat(songs) => songs.len(),
            Listing::Grouped { groups, .. } => groups.iter().map(|g| g.songs.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compose the listing for one view of a collection
pub fn compose(songs: &[Song], query: &ViewQuery) -> Listing {
    let filtered = filter_songs(songs, query.filter_by, &query.search);
    let sorted = sort_songs(filtered, query.sort_by);
    match query.group_by {
        Some(field) => Listing::Grouped {
            field,
            groups: group_songs(sorted, field),
        },
        None => Listing::Flat(sorted),
    }
}

/// Case-insensitive substring match on one field
///
/// The needle is trimmed before folding; an empty or whitespace-only
/// search matches every song.
fn filter_songs(songs: &[Song], field: SongField, search: &str) -> Vec<Song> {
    let needle = search.trim().to_lowercase();
    songs
        .iter()
        .filter(|song| song.field(field).to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Order by the folded field value; ties fall back to the raw value so
/// the result is deterministic regardless of input order
fn sort_songs(mut songs: Vec<Song>, field: SongField) -> Vec<Song> {
    songs.sort_by(|a, b| {
        let ka = a.field(field).to_lowercase();
        let kb = b.field(field).to_lowercase();
        ka.cmp(&kb)
            .then_with(|| a.field(field).cmp(b.field(field)))
    });
    songs
}

/// Partition sorted songs by exact field value
///
/// Groups appear in first-encounter order over the sorted input, and each
/// group keeps its songs in that same order.
fn group_songs(songs: Vec<Song>, field: SongField) -> Vec<SongGroup> {
    let mut groups: Vec<SongGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for song in songs {
        let key = song.field(field).to_string();
        match index.get(&key) {
            Some(&i) => groups[i].songs.push(song),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(SongGroup {
                    key,
                    songs: vec![song],
                });
            }
        }
    }
    groups
}
