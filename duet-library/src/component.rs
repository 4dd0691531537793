//! Component properties and mode detection
//!
//! A render request either delegates the collection to the caller or it
//! does not; the decision is made once per render, before composition,
//! from the request alone.

use duet_common::federation::RenderRequest;
use duet_common::{Role, Song};

/// Where the rendered collection lives and where mutations go
#[derive(Debug, Clone, PartialEq)]
pub enum LibraryMode {
    /// The caller owns the collection: render the supplied snapshot and
    /// point the mutation controls at the caller's routes
    Delegated {
        songs: Vec<Song>,
        on_add: String,
        on_delete: String,
    },
    /// No complete external supply: render the module's own store
    Standalone,
}

/// Resolved inputs for one render of the library component
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryProps {
    pub role: Role,
    pub mode: LibraryMode,
}

impl LibraryProps {
    /// Resolve a render request into props
    ///
    /// Delegation requires all three of the collection snapshot and the two
    /// mutation routes. A request carrying only some of them renders
    /// standalone, the same as a direct visit with no container at all.
    /// An absent role renders as a plain user.
    pub fn from_request(request: RenderRequest) -> Self {
        let role = request.role.unwrap_or(Role::User);
        let mode = match (request.songs, request.on_add, request.on_delete) {
            (Some(songs), Some(on_add), Some(on_delete)) => LibraryMode::Delegated {
                songs,
                on_add,
                on_delete,
            },
            _ => LibraryMode::Standalone,
        };
        Self { role, mode }
    }

    pub fn is_delegated(&self) -> bool {
        matches!(self.mode, LibraryMode::Delegated { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duet_common::ViewQuery;

    fn request(
        songs: bool,
        on_add: bool,
        on_delete: bool,
    ) -> RenderRequest {
        RenderRequest {
            role: None,
            songs: songs.then(Vec::new),
            on_add: on_add.then(|| "/api/songs".to_string()),
            on_delete: on_delete.then(|| "/api/songs/{id}".to_string()),
            view: ViewQuery::default(),
        }
    }

    #[test]
    fn test_all_three_fields_delegate() {
        let props = LibraryProps::from_request(request(true, true, true));
        assert!(props.is_delegated());
    }

    #[test]
    fn test_any_missing_field_means_standalone() {
        let combinations = [
            (false, false, false),
            (true, false, false),
            (false, true, false),
            (false, false, true),
            (true, true, false),
            (true, false, true),
            (false, true, true),
        ];
        for (songs, on_add, on_delete) in combinations {
            let props = LibraryProps::from_request(request(songs, on_add, on_delete));
            assert!(
                !props.is_delegated(),
                "expected standalone for songs={} on_add={} on_delete={}",
                songs,
                on_add,
                on_delete
            );
        }
    }

    #[test]
    fn test_empty_delegated_collection_stays_delegated() {
        // An empty snapshot is still a snapshot; it must not fall back to
        // the module's own store
        let props = LibraryProps::from_request(request(true, true, true));
        match props.mode {
            LibraryMode::Delegated { songs, .. } => assert!(songs.is_empty()),
            LibraryMode::Standalone => panic!("empty snapshot fell back to standalone"),
        }
    }

    #[test]
    fn test_role_defaults_to_user() {
        let props = LibraryProps::from_request(request(false, false, false));
        assert_eq!(props.role, Role::User);

        let mut admin = request(false, false, false);
        admin.role = Some(Role::Admin);
        let props = LibraryProps::from_request(admin);
        assert_eq!(props.role, Role::Admin);
    }
}
