//! Pluggable component registry
//!
//! The container never links the library view; it resolves it by name at
//! runtime through the `ComponentRegistry` trait. The production
//! implementation federates over HTTP: discover the remote's entry
//! manifest, validate it, then render by posting requests to the remote.
//! Tests substitute local stub registries.

use async_trait::async_trait;
use duet_common::federation::{RemoteEntry, RenderRequest, FEDERATION_VERSION};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info};

const ENTRY_PATH: &str = "/remote-entry.json";
const RENDER_PATH: &str = "/render";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Component resolution and render errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("Component name must be \"module/component\", got \"{0}\"")]
    InvalidName(String),

    #[error("Failed to fetch remote entry: {0}")]
    EntryFetch(String),

    #[error("Remote entry is not a valid manifest: {0}")]
    EntryInvalid(String),

    #[error("Remote publishes module \"{found}\", not \"{expected}\"")]
    ModuleMismatch { expected: String, found: String },

    #[error("Remote speaks federation v{remote}, this host speaks v{host}")]
    IncompatibleFederation { remote: u32, host: u32 },

    #[error("Remote module does not expose component \"{0}\"")]
    UnknownComponent(String),

    #[error("Render request failed: {0}")]
    Render(String),

    #[error("Remote render returned status {0}: {1}")]
    RenderStatus(u16, String),
}

/// A resolved view component, ready to render
#[async_trait]
pub trait Component: Send + Sync {
    /// Render one composition of the component as an HTML fragment
    async fn render(&self, request: &RenderRequest) -> Result<String, RegistryError>;
}

/// Opaque representation so resolve results can be `unwrap_err`'d
impl std::fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Component")
    }
}

/// Source of runtime-loaded components, keyed by "module/component" name
#[async_trait]
pub trait ComponentRegistry: Send + Sync {
    async fn resolve(&self, name: &str) -> Result<Arc<dyn Component>, RegistryError>;
}

// ========================================
// Federated implementation
// ========================================

/// Registry backed by a separately deployed remote module
///
/// The entry manifest is fetched lazily on the first resolve and cached
/// for the registry's lifetime. Only a successful fetch is cached: a
/// failed resolve leaves the registry untouched, so the next composition
/// gets a fresh attempt. Nothing retries within a single composition.
pub struct FederatedRegistry {
    remote_url: String,
    client: reqwest::Client,
    entry: OnceCell<RemoteEntry>,
}

impl FederatedRegistry {
    /// Registry over the module deployment at `remote_url`
    ///
    /// No network traffic happens here; the manifest is not consulted
    /// until the first resolve.
    pub fn new(remote_url: &str) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RegistryError::Client(e.to_string()))?;
        Ok(Self {
            remote_url: remote_url.trim_end_matches('/').to_string(),
            client,
            entry: OnceCell::new(),
        })
    }

    /// The cached entry manifest, fetching it on first use
    async fn entry(&self) -> Result<&RemoteEntry, RegistryError> {
        self.entry
            .get_or_try_init(|| async {
                let url = format!("{}{}", self.remote_url, ENTRY_PATH);
                debug!(url = %url, "Fetching remote entry manifest");

                let response = self
                    .client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| RegistryError::EntryFetch(e.to_string()))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(RegistryError::EntryFetch(format!(
                        "{} returned status {}",
                        url, status
                    )));
                }

                let entry: RemoteEntry = response
                    .json()
                    .await
                    .map_err(|e| RegistryError::EntryInvalid(e.to_string()))?;

                info!(
                    module = %entry.module,
                    version = %entry.version,
                    federation = entry.federation,
                    "Discovered remote module"
                );
                Ok(entry)
            })
            .await
    }
}

#[async_trait]
impl ComponentRegistry for FederatedRegistry {
    async fn resolve(&self, name: &str) -> Result<Arc<dyn Component>, RegistryError> {
        let (module, component) = split_name(name)?;
        let entry = self.entry().await?;
        validate_entry(entry, module, component)?;
        Ok(Arc::new(RemoteComponent {
            render_url: format!("{}{}", self.remote_url, RENDER_PATH),
            client: self.client.clone(),
        }))
    }
}

/// Split a qualified component name into (module, component)
fn split_name(name: &str) -> Result<(&str, &str), RegistryError> {
    match name.split_once('/') {
        Some((module, component)) if !module.is_empty() && !component.is_empty() => {
            Ok((module, component))
        }
        _ => Err(RegistryError::InvalidName(name.to_string())),
    }
}

/// Check that a manifest can satisfy a resolve request
fn validate_entry(
    entry: &RemoteEntry,
    module: &str,
    component: &str,
) -> Result<(), RegistryError> {
    if entry.federation != FEDERATION_VERSION {
        return Err(RegistryError::IncompatibleFederation {
            remote: entry.federation,
            host: FEDERATION_VERSION,
        });
    }
    if entry.module != module {
        return Err(RegistryError::ModuleMismatch {
            expected: module.to_string(),
            found: entry.module.clone(),
        });
    }
    if !entry.exposes.iter().any(|e| e == component) {
        return Err(RegistryError::UnknownComponent(component.to_string()));
    }
    Ok(())
}

/// Component living in a remote deployment, rendered over HTTP
struct RemoteComponent {
    render_url: String,
    client: reqwest::Client,
}

#[async_trait]
impl Component for RemoteComponent {
    async fn render(&self, request: &RenderRequest) -> Result<String, RegistryError> {
        let response = self
            .client
            .post(&self.render_url)
            .json(request)
            .send()
            .await
            .map_err(|e| RegistryError::Render(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistryError::RenderStatus(status.as_u16(), body));
        }

        response
            .text()
            .await
            .map_err(|e| RegistryError::Render(e.to_string()))
    }
}
