//! Remote entry manifest endpoint
//!
//! The discovery surface of the module: a container reads this before it
//! sends any render request. Changing the module name, the exposed
//! component list, or the federation revision is a breaking change for
//! every deployed container.

use axum::Json;
use duet_common::federation::{
    RemoteEntry, FEDERATION_VERSION, LIBRARY_COMPONENT, LIBRARY_MODULE,
};

/// GET /remote-entry.json
///
/// Describes this deployment: module name, build version, wire protocol
/// revision, and the components it exposes.
pub async fn remote_entry() -> Json<RemoteEntry> {
    Json(RemoteEntry {
        module: LIBRARY_MODULE.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        federation: FEDERATION_VERSION,
        exposes: vec![LIBRARY_COMPONENT.to_string()],
    })
}
