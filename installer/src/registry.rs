//! Plugin registry: which plugins are installed, persisted as JSON.
//!
//! The lifecycle manager registers a plugin before running its install
//! script; the install abort protocol de-registers it again if that script
//! fails, so a half-installed plugin never shows as installed.
//!
//! # Examples
//!
//! ```no_run
//! use plugin_installer::{PluginInfo, PluginRegistry};
//!
//! let mut registry = PluginRegistry::open("plugins.json").unwrap();
//! registry.insert("gallery", PluginInfo::new("Gallery", "1.2.0"));
//! registry.persist().unwrap();
//!
//! let reloaded = PluginRegistry::open("plugins.json").unwrap();
//! assert!(reloaded.contains("gallery"));
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or persisting the plugin registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Metadata recorded for one installed plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Display name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Whether the plugin is currently enabled.
    pub enabled: bool,
    /// RFC 3339 timestamp of installation.
    pub installed_at: String,
}

impl PluginInfo {
    /// Creates metadata for a plugin installed now, enabled.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            enabled: true,
            installed_at: Utc::now().to_rfc3339(),
        }
    }
}

/// In-memory map of plugin id to metadata, backed by a JSON file.
///
/// Mutations happen in memory; nothing touches disk until
/// [`persist`](Self::persist) is called.
#[derive(Debug)]
pub struct PluginRegistry {
    path: PathBuf,
    plugins: HashMap<String, PluginInfo>,
}

impl PluginRegistry {
    /// Opens the registry at `path`, starting empty if the file does not
    /// exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if an existing file cannot be read or
    /// parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref().to_path_buf();
        let plugins = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            serde_json::from_reader(reader)?
        } else {
            HashMap::new()
        };
        Ok(Self { path, plugins })
    }

    /// Registers a plugin under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: impl Into<String>, info: PluginInfo) {
        self.plugins.insert(id.into(), info);
    }

    /// De-registers the plugin under `id`, returning its metadata if it
    /// was registered.
    pub fn remove(&mut self, id: &str) -> Option<PluginInfo> {
        self.plugins.remove(id)
    }

    /// Whether a plugin is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.plugins.contains_key(id)
    }

    /// Returns the metadata registered under `id`.
    pub fn get(&self, id: &str) -> Option<&PluginInfo> {
        self.plugins.get(id)
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Writes the registry back to its JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] on I/O or serialization failure.
    pub fn persist(&self) -> Result<(), RegistryError> {
        let writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(writer, &self.plugins)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = PluginRegistry::open(dir.path().join("plugins.json")).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_persist_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugins.json");

        let mut registry = PluginRegistry::open(&path).unwrap();
        registry.insert("gallery", PluginInfo::new("Gallery", "1.2.0"));
        registry.persist().unwrap();

        let reloaded = PluginRegistry::open(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        let info = reloaded.get("gallery").unwrap();
        assert_eq!(info.name, "Gallery");
        assert_eq!(info.version, "1.2.0");
        assert!(info.enabled);
    }

    #[test]
    fn test_remove_returns_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = PluginRegistry::open(dir.path().join("plugins.json")).unwrap();
        registry.insert("gallery", PluginInfo::new("Gallery", "1.0.0"));

        let removed = registry.remove("gallery").unwrap();
        assert_eq!(removed.name, "Gallery");
        assert!(registry.remove("gallery").is_none());
        assert!(!registry.contains("gallery"));
    }

    #[test]
    fn test_open_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugins.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            PluginRegistry::open(&path),
            Err(RegistryError::Json(_))
        ));
    }
}
