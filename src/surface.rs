//! Provides the high-level Surface API for comparing plugin versions.

use crate::canonical::Registry;
use crate::compat::{BreakingConfig, BreakingEngine, BreakingResult};
use crate::generate_fingerprint;

/// The result of a compatibility comparison between two plugin surfaces.
#[derive(Debug, PartialEq, Eq)]
pub enum Compatibility {
    /// The two registries declare exactly the same interface.
    Green,
    /// The interfaces differ, but nothing a base caller relies on changed (e.g., a node was added).
    Yellow,
    /// At least one breaking change was found.
    Red,
}

/// The declared surface of one plugin version: its registry and fingerprint.
pub struct Surface {
    /// The normalized node registry.
    pub registry: Registry,
    /// The exact semantic fingerprint.
    pub fingerprint: String,
}

impl Surface {
    /// Creates a new `Surface` from a registry.
    ///
    /// The fingerprint is computed once here, so build one `Surface` per
    /// plugin version.
    pub fn try_from(registry: Registry) -> anyhow::Result<Self> {
        let fingerprint = generate_fingerprint(&registry)?;
        Ok(Surface {
            registry,
            fingerprint,
        })
    }

    /// Compares this `Surface` (the base version) with another `Surface` (the
    /// PR version) to determine their compatibility level.
    pub fn compare_with(&self, pr: &Surface) -> Compatibility {
        // Identical fingerprints mean identical interfaces.
        if self.fingerprint == pr.fingerprint {
            return Compatibility::Green;
        }

        if self.check_breaking_changes(pr).has_breaking_changes {
            Compatibility::Red
        } else {
            Compatibility::Yellow
        }
    }

    /// Check for breaking changes using the default rules.
    pub fn check_breaking_changes(&self, pr: &Surface) -> BreakingResult {
        self.check_breaking_changes_with_config(pr, &BreakingConfig::default())
    }

    /// Check for breaking changes with a custom configuration.
    pub fn check_breaking_changes_with_config(
        &self,
        pr: &Surface,
        config: &BreakingConfig,
    ) -> BreakingResult {
        BreakingEngine::new().check(&self.registry, &pr.registry, config)
    }
}
