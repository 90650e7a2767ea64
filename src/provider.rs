//! Sources of node registries.
//!
//! The diff engine only ever sees `Registry` values. Where they come from is
//! behind `RegistryProvider`, so tests can hand over fixtures directly and the
//! CLI can read a plugin's declaration manifest from disk.

use crate::canonical::Registry;
use crate::error::{RegistryError, Result};
use crate::normalize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File names tried, in order, when a provider is pointed at a directory.
pub const MANIFEST_FILE_NAMES: &[&str] = &[
    "node_registry.json",
    "node_registry.yaml",
    "node_registry.yml",
];

/// Produces the registry a plugin declares at `location`.
pub trait RegistryProvider {
    fn load(&self, location: &Path) -> Result<Registry>;
}

/// Reads a declaration manifest from the filesystem.
///
/// `location` may be the manifest itself or the plugin directory that holds
/// it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestProvider;

impl ManifestProvider {
    pub fn new() -> Self {
        Self
    }

    /// The manifest file `load` would read for `location`.
    pub fn resolve(&self, location: &Path) -> Result<PathBuf> {
        if location.is_file() {
            return Ok(location.to_path_buf());
        }

        if location.is_dir() {
            for name in MANIFEST_FILE_NAMES {
                let candidate = location.join(name);
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
        }

        Err(RegistryError::NotFound {
            location: location.to_path_buf(),
        })
    }
}

impl RegistryProvider for ManifestProvider {
    fn load(&self, location: &Path) -> Result<Registry> {
        let path = self.resolve(location)?;
        tracing::debug!(manifest = %path.display(), "loading node registry");

        let content = std::fs::read_to_string(&path).map_err(|source| RegistryError::Io {
            path: path.clone(),
            source,
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml" | "yml")
        );
        let parsed = if is_yaml {
            normalize::parse_yaml(&content)
        } else {
            normalize::parse_json(&content)
        };

        let registry = parsed.map_err(|e| RegistryError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::info!(
            manifest = %path.display(),
            nodes = registry.len(),
            "loaded node registry"
        );
        Ok(registry)
    }
}

/// Serves registries registered ahead of time, keyed by location.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProvider {
    registries: HashMap<PathBuf, Registry>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, location: impl Into<PathBuf>, registry: Registry) -> Self {
        self.registries.insert(location.into(), registry);
        self
    }
}

impl RegistryProvider for InMemoryProvider {
    fn load(&self, location: &Path) -> Result<Registry> {
        self.registries
            .get(location)
            .cloned()
            .ok_or_else(|| RegistryError::Unregistered {
                location: location.to_path_buf(),
            })
    }
}

/// Loads both sides of a comparison, failing before any diffing if either
/// side is unavailable.
pub fn load_pair<P: RegistryProvider + ?Sized>(
    provider: &P,
    base: &Path,
    pr: &Path,
) -> Result<(Registry, Registry)> {
    let base_registry = provider.load(base)?;
    let pr_registry = provider.load(pr)?;
    Ok((base_registry, pr_registry))
}
