//! Core types for breaking change detection

use crate::canonical::InputSpec;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Represents a breaking change detected between two node registries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakingChange {
    /// The node this change concerns
    pub node_name: String,
    /// What changed, with the values needed to explain it
    pub kind: ChangeKind,
    /// The rule ID that detected this change
    pub rule_id: String,
    /// Severity level of the breaking change
    pub severity: BreakingSeverity,
}

/// The closed set of incompatibilities the engine can report.
///
/// Variants carry data only; the human-readable text lives in the report
/// module so callers can match on structure instead of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    ReturnTypesChanged {
        base: Vec<String>,
        pr: Vec<String>,
    },
    ReturnTypesReordered {
        base: Vec<String>,
        pr: Vec<String>,
    },
    InputRemoved {
        input: String,
        base: InputSpec,
    },
    InputTypeChanged {
        input: String,
        base: String,
        pr: String,
    },
    /// Only produced when newly required inputs are flagged.
    InputAdded {
        input: String,
        pr: String,
    },
    FunctionChanged {
        base: Option<String>,
        pr: Option<String>,
    },
    NodeRemoved,
}

impl ChangeKind {
    /// Stable upper-case code, e.g. `RETURN_TYPES_CHANGED`.
    pub fn code(&self) -> &'static str {
        match self {
            ChangeKind::ReturnTypesChanged { .. } => "RETURN_TYPES_CHANGED",
            ChangeKind::ReturnTypesReordered { .. } => "RETURN_TYPES_REORDERED",
            ChangeKind::InputRemoved { .. } => "INPUT_REMOVED",
            ChangeKind::InputTypeChanged { .. } => "INPUT_TYPE_CHANGED",
            ChangeKind::InputAdded { .. } => "INPUT_ADDED",
            ChangeKind::FunctionChanged { .. } => "FUNCTION_CHANGED",
            ChangeKind::NodeRemoved => "NODE_REMOVED",
        }
    }

    /// Reordering keeps every output, so it is reported with lower severity.
    pub fn default_severity(&self) -> BreakingSeverity {
        match self {
            ChangeKind::ReturnTypesReordered { .. } => BreakingSeverity::Warning,
            _ => BreakingSeverity::Error,
        }
    }
}

impl BreakingChange {
    pub fn new(node_name: &str, rule_id: &str, kind: ChangeKind) -> Self {
        Self {
            node_name: node_name.to_string(),
            severity: kind.default_severity(),
            kind,
            rule_id: rule_id.to_string(),
        }
    }

    /// Snapshot of the base-side value, if the change has one.
    pub fn base_value(&self) -> Option<serde_json::Value> {
        match &self.kind {
            ChangeKind::ReturnTypesChanged { base, .. }
            | ChangeKind::ReturnTypesReordered { base, .. } => Some(json!(base)),
            ChangeKind::InputRemoved { base, .. } => serde_json::to_value(base).ok(),
            ChangeKind::InputTypeChanged { base, .. } => Some(json!(base)),
            ChangeKind::FunctionChanged { base, .. } => base.as_ref().map(|b| json!(b)),
            ChangeKind::InputAdded { .. } | ChangeKind::NodeRemoved => None,
        }
    }

    /// Snapshot of the PR-side value, if the change has one.
    pub fn pr_value(&self) -> Option<serde_json::Value> {
        match &self.kind {
            ChangeKind::ReturnTypesChanged { pr, .. }
            | ChangeKind::ReturnTypesReordered { pr, .. } => Some(json!(pr)),
            ChangeKind::InputTypeChanged { pr, .. } | ChangeKind::InputAdded { pr, .. } => {
                Some(json!(pr))
            }
            ChangeKind::FunctionChanged { pr, .. } => pr.as_ref().map(|p| json!(p)),
            ChangeKind::InputRemoved { .. } | ChangeKind::NodeRemoved => None,
        }
    }
}

/// Severity levels for breaking changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakingSeverity {
    /// Existing callers will fail
    Error,
    /// Existing callers may bind outputs incorrectly
    Warning,
}

/// Context for rule execution
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The rule being run, stamped onto every change it produces
    pub rule_id: &'a str,
    /// Active rule policy
    pub config: &'a crate::compat::engine::BreakingConfig,
}

impl RuleContext<'_> {
    pub fn change(&self, node_name: &str, kind: ChangeKind) -> BreakingChange {
        BreakingChange::new(node_name, self.rule_id, kind)
    }
}
