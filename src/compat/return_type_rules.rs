//! RETURN_TYPES_SAME - positional output compatibility
//!
//! Callers bind a node's outputs by position, so the sequence of return types
//! is part of the interface. How strictly it is compared depends on the
//! configured rule generation.

use crate::canonical::NodeDefinition;
use crate::compat::generation::RuleGeneration;
use crate::compat::types::{BreakingChange, ChangeKind, RuleContext};
use std::collections::HashMap;

pub fn check_return_types_same(
    base: &NodeDefinition,
    pr: &NodeDefinition,
    context: &RuleContext,
) -> Vec<BreakingChange> {
    let kind = match context.config.generation {
        RuleGeneration::Prefix => compare_prefix(&base.return_types, &pr.return_types),
        RuleGeneration::Strict => compare_strict(&base.return_types, &pr.return_types),
        RuleGeneration::Refined => compare_refined(&base.return_types, &pr.return_types),
    };

    kind.map(|kind| context.change(&base.name, kind))
        .into_iter()
        .collect()
}

/// Arity first, then content as a multiset, then order.
fn compare_refined(base: &[String], pr: &[String]) -> Option<ChangeKind> {
    if base.len() != pr.len() {
        return Some(changed(base, pr));
    }

    if type_counts(base) != type_counts(pr) {
        return Some(changed(base, pr));
    }

    if base != pr {
        return Some(ChangeKind::ReturnTypesReordered {
            base: base.to_vec(),
            pr: pr.to_vec(),
        });
    }

    None
}

/// Duplicate tags are significant: two `STRING` outputs are not one.
fn type_counts(types: &[String]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for tag in types {
        *counts.entry(tag.as_str()).or_insert(0) += 1;
    }
    counts
}

fn compare_strict(base: &[String], pr: &[String]) -> Option<ChangeKind> {
    (base != pr).then(|| changed(base, pr))
}

/// Each base position must still hold the same type; extra outputs at the end
/// are fine.
fn compare_prefix(base: &[String], pr: &[String]) -> Option<ChangeKind> {
    let preserved = base.len() <= pr.len() && base.iter().zip(pr).all(|(b, p)| b == p);
    (!preserved).then(|| changed(base, pr))
}

fn changed(base: &[String], pr: &[String]) -> ChangeKind {
    ChangeKind::ReturnTypesChanged {
        base: base.to_vec(),
        pr: pr.to_vec(),
    }
}
