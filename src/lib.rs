pub mod canonical;
pub mod compat;
pub mod error;
pub mod normalize;
pub mod provider;
pub mod report;
pub mod surface;

pub use canonical::{InputSpec, NodeDefinition, Registry};
pub use compat::{BreakingChange, ChangeKind, diff};
pub use error::{ManifestError, RegistryError};
pub use provider::{ManifestProvider, RegistryProvider};
pub use surface::{Compatibility, Surface};

use anyhow::Context;
use sha2::{Digest, Sha256};

/// Generates a semantic fingerprint for a node registry.
///
/// The fingerprint is a SHA-256 hash of the registry's canonical
/// representation. It is insensitive to the order in which nodes and inputs
/// were declared, but return types stay positional.
///
/// # Arguments
///
/// * `registry` - The normalized registry to fingerprint.
///
/// # Returns
///
/// A `Result` containing the hex-encoded SHA-256 fingerprint string,
/// or an error if serialization fails.
pub fn generate_fingerprint(registry: &Registry) -> anyhow::Result<String> {
    // 1. Project the registry onto a name-sorted view.
    let canonical = registry.to_sorted();

    // 2. Serialize the canonical representation to a stable JSON string.
    let json_string = serde_json::to_string_pretty(&canonical)
        .context("Failed to serialize canonical registry to JSON")?;

    // 3. Compute the SHA-256 hash of the JSON string.
    let mut hasher = Sha256::new();
    hasher.update(json_string.as_bytes());
    let hash_result = hasher.finalize();

    // 4. Format as a hex string and return.
    Ok(format!("{:x}", hash_result))
}
