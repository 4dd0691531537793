//! Federation wire contract between the container and remote modules
//!
//! A remote module publishes an entry manifest describing what it exposes;
//! the container discovers the manifest at runtime and posts render requests
//! to the module. Neither side links the other at build time, so these
//! types are the entire shared surface.

use crate::model::{Role, Song, ViewQuery};
use serde::{Deserialize, Serialize};

/// Wire protocol revision; bumped on incompatible manifest or request changes
pub const FEDERATION_VERSION: u32 = 1;

/// Module name the library deployment publishes
pub const LIBRARY_MODULE: &str = "duet-library";

/// Component the library module exposes
pub const LIBRARY_COMPONENT: &str = "music-library";

/// Entry manifest served by a remote module at `/remote-entry.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    /// Module name, e.g. "duet-library"
    pub module: String,
    /// Module build version, informational
    pub version: String,
    /// Wire protocol revision the module speaks
    pub federation: u32,
    /// Component names resolvable within this module
    pub exposes: Vec<String>,
}

/// One render of a remote component, posted to the module's `/render`
///
/// The three delegation fields travel together: a request carrying the
/// song collection and both mutation routes puts the component in
/// delegated mode; any of them missing and the component falls back to
/// its own standalone collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Viewer role; an anonymous viewer renders as a plain user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Host-owned collection snapshot to render instead of the module's own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub songs: Option<Vec<Song>>,
    /// Route add-song submissions should target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_add: Option<String>,
    /// Route deletions should target; "{id}" is replaced per song
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
    /// Filter, sort, and group state for this composition
    #[serde(default)]
    pub view: ViewQuery,
}
