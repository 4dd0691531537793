//! Configuration file loading and data folder resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! clap covers the first two tiers in each binary; this module covers the
//! third. The config file is optional and shared by both services, with one
//! TOML table per service.

use std::path::PathBuf;
use tracing::warn;

/// Lazily loaded view of the optional shared config file
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    table: Option<toml::Value>,
}

impl ConfigFile {
    /// Load the config file if one exists; absent or unreadable means empty
    pub fn load() -> Self {
        let Some(path) = config_file_path() else {
            return Self::default();
        };
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                return Self::default();
            }
        };
        match toml::from_str::<toml::Value>(&content) {
            Ok(table) => Self { table: Some(table) },
            Err(e) => {
                warn!("Ignoring malformed config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// String value at `[section] key`
    pub fn string(&self, section: &str, key: &str) -> Option<String> {
        self.table
            .as_ref()?
            .get(section)?
            .get(key)?
            .as_str()
            .map(str::to_string)
    }

    /// Port value at `[section] key`; out-of-range integers are ignored
    pub fn port(&self, section: &str, key: &str) -> Option<u16> {
        let value = self.table.as_ref()?.get(section)?.get(key)?.as_integer()?;
        u16::try_from(value).ok()
    }
}

/// Config file path for the platform
///
/// On Linux, `~/.config/duet/config.toml` first, then
/// `/etc/duet/config.toml`; elsewhere the user config directory only.
fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("duet").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }
    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/duet/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }
    None
}

/// OS-dependent default data folder (token storage lives here)
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("duet"))
        .unwrap_or_else(|| PathBuf::from("./duet_data"))
}
