//! Domain model shared by the container and the library module
//!
//! Songs, user roles, and the view query that drives the composed
//! library listing. All types cross process boundaries as JSON, so
//! everything here derives Serialize/Deserialize.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ========================================
// Roles
// ========================================

/// User role attached to a session and forwarded to the library view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May add and delete songs
    Admin,
    /// Read-only access to the listing
    User,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

// ========================================
// Songs
// ========================================

/// A song in a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Opaque unique identifier, assigned by the owning store
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
}

impl Song {
    /// The value of one displayable field
    pub fn field(&self, field: SongField) -> &str {
        match field {
            SongField::Title => &self.title,
            SongField::Artist => &self.artist,
            SongField::Album => &self.album,
        }
    }
}

/// Song data as submitted by a client, before an id is assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    /// Optional at the form level; an absent album arrives as ""
    #[serde(default)]
    pub album: String,
}

impl NewSong {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
        }
    }
}

// ========================================
// View query
// ========================================

/// A displayable song field, used to select what to filter, sort, or group on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SongField {
    Title,
    Artist,
    Album,
}

impl SongField {
    pub fn as_str(self) -> &'static str {
        match self {
            SongField::Title => "title",
            SongField::Artist => "artist",
            SongField::Album => "album",
        }
    }
}

impl fmt::Display for SongField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SongField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SongField::Title),
            "artist" => Ok(SongField::Artist),
            "album" => Ok(SongField::Album),
            other => Err(format!("unknown song field: {}", other)),
        }
    }
}

/// View state for one composition of the library listing
///
/// Arrives either as URL query parameters (container page) or embedded in a
/// render request (module endpoint). Every field has a default, so an empty
/// query composes the full, title-sorted, ungrouped listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewQuery {
    /// Substring to match; surrounding whitespace is ignored
    #[serde(default)]
    pub search: String,
    /// Field the search applies to
    #[serde(default = "default_field")]
    pub filter_by: SongField,
    /// Field the listing is ordered by
    #[serde(default = "default_field")]
    pub sort_by: SongField,
    /// Optional grouping field; "" from a form select means no grouping
    #[serde(default, deserialize_with = "empty_as_none")]
    pub group_by: Option<SongField>,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter_by: SongField::Title,
            sort_by: SongField::Title,
            group_by: None,
        }
    }
}

fn default_field() -> SongField {
    SongField::Title
}

/// HTML selects submit "" for the no-grouping option; treat it as absent
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<SongField>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn test_song_field_accessor() {
        let song = Song {
            id: "s1".to_string(),
            title: "Title".to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
        };
        assert_eq!(song.field(SongField::Title), "Title");
        assert_eq!(song.field(SongField::Artist), "Artist");
        assert_eq!(song.field(SongField::Album), "Album");
    }

    #[test]
    fn test_view_query_defaults() {
        let query: ViewQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query, ViewQuery::default());
        assert_eq!(query.search, "");
        assert_eq!(query.filter_by, SongField::Title);
        assert_eq!(query.sort_by, SongField::Title);
        assert_eq!(query.group_by, None);
    }

    #[test]
    fn test_view_query_empty_group_means_none() {
        let query: ViewQuery =
            serde_json::from_str(r#"{"group_by": ""}"#).unwrap();
        assert_eq!(query.group_by, None);

        let query: ViewQuery =
            serde_json::from_str(r#"{"group_by": "album"}"#).unwrap();
        assert_eq!(query.group_by, Some(SongField::Album));
    }

    #[test]
    fn test_view_query_rejects_unknown_field() {
        let result = serde_json::from_str::<ViewQuery>(r#"{"group_by": "label"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_song_album_defaults_empty() {
        let song: NewSong =
            serde_json::from_str(r#"{"title": "T", "artist": "A"}"#).unwrap();
        assert_eq!(song.album, "");
    }
}
