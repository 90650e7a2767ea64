//! Human-readable rendering of breaking changes.
//!
//! All narrative text for a change lives here; the engine only produces
//! structured `ChangeKind` values.

use crate::compat::types::{BreakingChange, BreakingSeverity, ChangeKind};
use std::fmt::Write;

pub const NO_CHANGES: &str = "No breaking changes detected.";

/// Whether the gate should fail.
pub fn has_breaking_changes(changes: &[BreakingChange]) -> bool {
    !changes.is_empty()
}

/// Short title for a change kind.
pub fn label(kind: &ChangeKind) -> &'static str {
    match kind {
        ChangeKind::ReturnTypesChanged { .. } => "Return types changed",
        ChangeKind::ReturnTypesReordered { .. } => "Return types reordered",
        ChangeKind::InputRemoved { .. } => "Required input removed",
        ChangeKind::InputTypeChanged { .. } => "Input type changed",
        ChangeKind::InputAdded { .. } => "Required input added",
        ChangeKind::FunctionChanged { .. } => "Entry point function changed",
        ChangeKind::NodeRemoved => "Node removed",
    }
}

/// One-sentence explanation of a change.
pub fn details(kind: &ChangeKind) -> String {
    match kind {
        ChangeKind::ReturnTypesChanged { base, pr } if base.len() != pr.len() => format!(
            "Return types changed from {} to {} outputs.",
            base.len(),
            pr.len()
        ),
        ChangeKind::ReturnTypesChanged { .. } => {
            "One or more return types were replaced with an incompatible type.".to_string()
        }
        ChangeKind::ReturnTypesReordered { .. } => {
            "Return types were reordered; callers binding outputs by position will break."
                .to_string()
        }
        ChangeKind::InputRemoved { input, .. } => {
            format!("Required input '{input}' was removed.")
        }
        ChangeKind::InputTypeChanged { input, .. } => {
            format!("Input type changed for '{input}'.")
        }
        ChangeKind::InputAdded { input, .. } => {
            format!("New required input '{input}' was added.")
        }
        ChangeKind::FunctionChanged { base, pr } => match (base, pr) {
            (Some(base), Some(pr)) => format!("Entry point changed from '{base}' to '{pr}'."),
            (Some(base), None) => format!("Entry point '{base}' was removed."),
            (None, Some(pr)) => format!("Entry point '{pr}' was added."),
            (None, None) => "Entry point changed.".to_string(),
        },
        ChangeKind::NodeRemoved => "Node was removed.".to_string(),
    }
}

/// Groups changes by node, in the order nodes first appear, keeping the
/// order of changes within each node.
pub fn group_by_node(changes: &[BreakingChange]) -> Vec<(&str, Vec<&BreakingChange>)> {
    let mut groups: Vec<(&str, Vec<&BreakingChange>)> = Vec::new();
    for change in changes {
        match groups.iter_mut().find(|(name, _)| *name == change.node_name) {
            Some((_, group)) => group.push(change),
            None => groups.push((change.node_name.as_str(), vec![change])),
        }
    }
    groups
}

/// Renders the text report printed by the gate.
pub fn format_breaking_changes(changes: &[BreakingChange]) -> String {
    if changes.is_empty() {
        return NO_CHANGES.to_string();
    }

    let groups = group_by_node(changes);
    let mut out = String::from("Breaking changes detected:\n");

    for (node_name, node_changes) in &groups {
        let _ = writeln!(out, "\nNode: {node_name}");
        for change in node_changes {
            let marker = match change.severity {
                BreakingSeverity::Error => "",
                BreakingSeverity::Warning => " (warning)",
            };
            let _ = writeln!(
                out,
                "  [{}] {}{}: {}",
                change.kind.code(),
                label(&change.kind),
                marker,
                details(&change.kind)
            );
            if let Some(base) = change.base_value() {
                let _ = writeln!(out, "    Base: {}", render_value(&base));
            }
            if let Some(pr) = change.pr_value() {
                let _ = writeln!(out, "    PR: {}", render_value(&pr));
            }
        }
    }

    let _ = write!(
        out,
        "\nSummary: {} breaking change(s) in {} node(s)",
        changes.len(),
        groups.len()
    );
    out
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
