//! Error types for registry loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for registry provider operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// A registry could not be produced at all. Diffing never starts when a
/// provider returns one of these.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No declaration manifest at the given location.
    #[error("No node registry manifest found at {}", .location.display())]
    NotFound {
        /// Path that was searched.
        location: PathBuf,
    },

    /// The manifest exists but could not be read.
    #[error("Failed to read node registry manifest {}: {source}", .path.display())]
    Io {
        /// Manifest path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest could not be parsed.
    #[error("Failed to parse node registry manifest {}: {message}", .path.display())]
    Parse {
        /// Manifest path.
        path: PathBuf,
        /// Parser error text.
        message: String,
    },

    /// An in-memory provider has nothing registered for the location.
    #[error("No registry registered for {}", .location.display())]
    Unregistered {
        /// Requested location.
        location: PathBuf,
    },
}

/// A manifest was read but does not describe a node registry.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// One node entry has a field of the wrong shape.
    #[error("node '{node}': {source}")]
    Node {
        node: String,
        #[source]
        source: serde_json::Error,
    },
}
