//! Breaking change detection engine
//!
//! This module provides the main engine for detecting breaking changes between
//! two node registries, driven by the rule registry and a `BreakingConfig`.

use crate::canonical::Registry;
use crate::compat::generation::RuleGeneration;
use crate::compat::node_rules;
use crate::compat::rule_registry::{self, NODE_NO_DELETE};
use crate::compat::types::{BreakingChange, RuleContext};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for breaking change detection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakingConfig {
    /// Return-type rule generation
    #[serde(default)]
    pub generation: RuleGeneration,
    /// Specific rules to enable (all rules run if empty)
    #[serde(default)]
    pub use_rules: Vec<String>,
    /// Rules to explicitly disable
    #[serde(default)]
    pub except_rules: Vec<String>,
    /// Nodes that are never checked
    #[serde(default)]
    pub ignore_nodes: Vec<String>,
    /// Report inputs that are required in the PR but not in the base
    #[serde(default)]
    pub flag_added_required_inputs: bool,
}

impl BreakingConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        #[derive(serde::Deserialize)]
        struct ConfigFile {
            breaking: Option<BreakingConfig>,
        }

        let config_file: ConfigFile = serde_yaml::from_str(yaml)?;
        let config = config_file.breaking.unwrap_or_default();
        config.warn_unknown_rules();
        Ok(config)
    }

    /// Whether a rule is selected by `use_rules` and not excluded by `except_rules`
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if self.except_rules.iter().any(|r| r == rule_id) {
            return false;
        }
        self.use_rules.is_empty() || self.use_rules.iter().any(|r| r == rule_id)
    }

    pub fn is_node_ignored(&self, node_name: &str) -> bool {
        self.ignore_nodes.iter().any(|n| n == node_name)
    }

    fn warn_unknown_rules(&self) {
        for rule_id in self.use_rules.iter().chain(&self.except_rules) {
            if !rule_registry::is_known_rule(rule_id) {
                tracing::warn!(rule = %rule_id, "unknown rule in configuration, ignoring");
            }
        }
    }
}

/// Result of breaking change detection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreakingResult {
    /// All breaking changes found, in detection order
    pub changes: Vec<BreakingChange>,
    /// Whether any breaking changes were found
    pub has_breaking_changes: bool,
    /// Count per change code
    pub summary: BTreeMap<String, usize>,
    /// Rules that were executed
    pub executed_rules: Vec<String>,
}

impl BreakingResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Add breaking changes to the result
    pub fn add_changes(&mut self, new_changes: Vec<BreakingChange>) {
        self.has_breaking_changes = !new_changes.is_empty() || self.has_breaking_changes;

        for change in &new_changes {
            *self.summary.entry(change.kind.code().to_string()).or_insert(0) += 1;
        }

        self.changes.extend(new_changes);
    }

    /// Mark a rule as executed
    pub fn mark_rule_executed(&mut self, rule_id: &str) {
        self.executed_rules.push(rule_id.to_string());
    }
}

/// Main engine for breaking change detection
#[derive(Debug, Default)]
pub struct BreakingEngine {
    // Engine is stateless, uses rule_registry directly
}

impl BreakingEngine {
    /// Create a new breaking change engine
    pub fn new() -> Self {
        Self {}
    }

    /// Check for breaking changes from `base` to `pr`.
    ///
    /// Nodes are visited in `base` declaration order. A node missing from `pr`
    /// yields only its removal; nodes that exist only in `pr` are never
    /// reported.
    pub fn check(&self, base: &Registry, pr: &Registry, config: &BreakingConfig) -> BreakingResult {
        let mut result = BreakingResult::new();

        let enabled_rules: Vec<_> = rule_registry::get_node_rules()
            .iter()
            .filter(|(rule_id, _)| config.is_rule_enabled(rule_id))
            .collect();
        let check_deletes = config.is_rule_enabled(NODE_NO_DELETE);

        if check_deletes {
            result.mark_rule_executed(NODE_NO_DELETE);
        }
        for (rule_id, _) in &enabled_rules {
            result.mark_rule_executed(rule_id);
        }

        for base_node in base.nodes() {
            if config.is_node_ignored(&base_node.name) {
                tracing::debug!(node = %base_node.name, "skipping ignored node");
                continue;
            }

            if check_deletes {
                let context = RuleContext {
                    rule_id: NODE_NO_DELETE,
                    config,
                };
                if let Some(removed) =
                    node_rules::check_node_no_delete(&base_node.name, pr, &context)
                {
                    result.add_changes(vec![removed]);
                    continue;
                }
            }

            // Per-node rules only compare nodes present on both sides.
            let Some(pr_node) = pr.get(&base_node.name) else {
                continue;
            };

            for (rule_id, rule_fn) in &enabled_rules {
                let context = RuleContext {
                    rule_id: *rule_id,
                    config,
                };
                result.add_changes(rule_fn(base_node, pr_node, &context));
            }
        }

        tracing::debug!(
            base_nodes = base.len(),
            pr_nodes = pr.len(),
            changes = result.changes.len(),
            generation = %config.generation,
            "registry diff complete"
        );

        result
    }

    /// Get rule count from the rule registry
    pub fn get_rule_count(&self) -> usize {
        rule_registry::get_rule_count()
    }

    /// Verify rule table integrity
    pub fn verify_rules(&self) -> Result<(), String> {
        rule_registry::verify_rules()
    }
}

/// Breaking changes from `base` to `pr` under the default rules.
pub fn diff(base: &Registry, pr: &Registry) -> Vec<BreakingChange> {
    BreakingEngine::new()
        .check(base, pr, &BreakingConfig::default())
        .changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::NodeDefinition;

    fn registry() -> Registry {
        [
            NodeDefinition::new("Load")
                .with_return_types(["IMAGE"])
                .with_entry_point("load"),
            NodeDefinition::new("Save").with_entry_point("save"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_default_config() {
        let config = BreakingConfig::default();
        assert_eq!(config.generation, RuleGeneration::Refined);
        assert!(config.use_rules.is_empty());
        assert!(config.except_rules.is_empty());
        assert!(!config.flag_added_required_inputs);
    }

    #[test]
    fn test_engine_runs_every_rule_by_default() {
        let engine = BreakingEngine::new();
        let result = engine.check(&registry(), &registry(), &BreakingConfig::default());

        assert_eq!(result.executed_rules.len(), engine.get_rule_count());
        assert!(engine.verify_rules().is_ok());
    }

    #[test]
    fn test_rule_exclusion() {
        let engine = BreakingEngine::new();
        let config = BreakingConfig {
            except_rules: vec!["NODE_NO_DELETE".to_string()],
            ..Default::default()
        };

        let result = engine.check(&registry(), &Registry::new(), &config);

        assert!(!result.executed_rules.contains(&"NODE_NO_DELETE".to_string()));
        assert!(!result.has_breaking_changes);
    }

    #[test]
    fn test_use_rules_restricts_execution() {
        let config = BreakingConfig {
            use_rules: vec!["ENTRY_POINT_SAME".to_string()],
            ..Default::default()
        };
        let pr: Registry = [NodeDefinition::new("Load").with_entry_point("open")]
            .into_iter()
            .collect();

        let result = BreakingEngine::new().check(&registry(), &pr, &config);

        assert_eq!(result.executed_rules, vec!["ENTRY_POINT_SAME"]);
        // Save was deleted and Load lost its output, but only the entry point rule ran.
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.summary.get("FUNCTION_CHANGED"), Some(&1));
    }

    #[test]
    fn test_ignored_nodes_are_skipped() {
        let config = BreakingConfig {
            ignore_nodes: vec!["Save".to_string()],
            ..Default::default()
        };
        let pr: Registry = [registry().get("Load").cloned().unwrap()]
            .into_iter()
            .collect();

        let result = BreakingEngine::new().check(&registry(), &pr, &config);
        assert!(result.changes.is_empty());
    }

    #[test]
    fn test_empty_check() {
        let result = BreakingEngine::new().check(
            &Registry::new(),
            &Registry::new(),
            &BreakingConfig::default(),
        );

        assert!(!result.has_breaking_changes);
        assert!(result.changes.is_empty());
    }

    #[test]
    fn test_removed_node_reports_only_removal() {
        let pr: Registry = [registry().get("Load").cloned().unwrap()]
            .into_iter()
            .collect();

        let result = BreakingEngine::new().check(&registry(), &pr, &BreakingConfig::default());

        assert_eq!(result.changes.len(), 1);
        let change = &result.changes[0];
        assert_eq!(change.node_name, "Save");
        assert_eq!(change.rule_id, NODE_NO_DELETE);
        assert!(matches!(change.kind, crate::compat::types::ChangeKind::NodeRemoved));
        assert_eq!(result.summary.get("NODE_REMOVED"), Some(&1));
    }
}
