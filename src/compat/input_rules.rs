//! REQUIRED_INPUT_SAME - required inputs keep their names and types

use crate::canonical::NodeDefinition;
use crate::compat::types::{BreakingChange, ChangeKind, RuleContext};

/// Walks the base node's required inputs in declaration order. A missing
/// input and a retyped input are reported from the same pass so the output
/// for each input stays next to its neighbours.
pub fn check_required_input_same(
    base: &NodeDefinition,
    pr: &NodeDefinition,
    context: &RuleContext,
) -> Vec<BreakingChange> {
    let mut changes = Vec::new();

    for (input_name, base_spec) in &base.required_inputs {
        match pr.required_inputs.get(input_name) {
            None => changes.push(context.change(
                &base.name,
                ChangeKind::InputRemoved {
                    input: input_name.clone(),
                    base: base_spec.clone(),
                },
            )),
            Some(pr_spec) if pr_spec.type_name != base_spec.type_name => {
                changes.push(context.change(
                    &base.name,
                    ChangeKind::InputTypeChanged {
                        input: input_name.clone(),
                        base: base_spec.type_name.clone(),
                        pr: pr_spec.type_name.clone(),
                    },
                ))
            }
            Some(_) => {}
        }
    }

    if context.config.flag_added_required_inputs {
        for (input_name, pr_spec) in &pr.required_inputs {
            if !base.required_inputs.contains_key(input_name) {
                changes.push(context.change(
                    &base.name,
                    ChangeKind::InputAdded {
                        input: input_name.clone(),
                        pr: pr_spec.type_name.clone(),
                    },
                ));
            }
        }
    }

    changes
}
