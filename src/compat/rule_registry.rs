//! Rule registry
//!
//! Rules run in table order for every node present in both registries, which
//! fixes the order of changes within a node: outputs, then inputs, then the
//! entry point.

use crate::canonical::NodeDefinition;
use crate::compat::types::{BreakingChange, RuleContext};
use crate::compat::{input_rules, node_rules, return_type_rules};

/// Signature shared by every per-node rule.
pub type NodeRuleFn = fn(&NodeDefinition, &NodeDefinition, &RuleContext) -> Vec<BreakingChange>;

/// Registry-level rule: a base node missing from the PR registry.
pub const NODE_NO_DELETE: &str = "NODE_NO_DELETE";

/// Per-node rules, in the order their changes are reported
const NODE_RULES: &[(&str, NodeRuleFn)] = &[
    ("RETURN_TYPES_SAME", return_type_rules::check_return_types_same),
    ("REQUIRED_INPUT_SAME", input_rules::check_required_input_same),
    ("ENTRY_POINT_SAME", node_rules::check_entry_point_same),
];

pub fn get_node_rules() -> &'static [(&'static str, NodeRuleFn)] {
    NODE_RULES
}

/// Every rule ID the engine knows, registry-level first
pub fn all_rule_ids() -> Vec<&'static str> {
    std::iter::once(NODE_NO_DELETE)
        .chain(NODE_RULES.iter().map(|(id, _)| *id))
        .collect()
}

pub fn is_known_rule(rule_id: &str) -> bool {
    rule_id == NODE_NO_DELETE || NODE_RULES.iter().any(|(id, _)| *id == rule_id)
}

/// Get count of all rules
pub const fn get_rule_count() -> usize {
    NODE_RULES.len() + 1
}

/// Verify rule consistency (for testing)
pub fn verify_rules() -> Result<(), String> {
    let mut seen = std::collections::HashSet::new();
    for rule_id in all_rule_ids() {
        if !seen.insert(rule_id) {
            return Err(format!("Duplicate rule ID: {}", rule_id));
        }
    }
    Ok(())
}
