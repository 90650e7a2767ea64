//! Node-level rules: deletion and entry point

use crate::canonical::{NodeDefinition, Registry};
use crate::compat::types::{BreakingChange, ChangeKind, RuleContext};

/// NODE_NO_DELETE - checks a base node still exists in the PR registry
pub fn check_node_no_delete(
    node_name: &str,
    pr: &Registry,
    context: &RuleContext,
) -> Option<BreakingChange> {
    (!pr.contains(node_name)).then(|| context.change(node_name, ChangeKind::NodeRemoved))
}

/// ENTRY_POINT_SAME - checks the implementing function keeps its name.
/// Gaining or losing an entry point counts as a change too.
pub fn check_entry_point_same(
    base: &NodeDefinition,
    pr: &NodeDefinition,
    context: &RuleContext,
) -> Vec<BreakingChange> {
    if base.entry_point == pr.entry_point {
        return Vec::new();
    }

    vec![context.change(
        &base.name,
        ChangeKind::FunctionChanged {
            base: base.entry_point.clone(),
            pr: pr.entry_point.clone(),
        },
    )]
}
