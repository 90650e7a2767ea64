//! Rule generations for return-type compatibility
//!
//! The return-type rule has been tightened twice over the life of the gate.
//! Each generation stays selectable so a project can pin the behavior its CI
//! was written against.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleGeneration {
    /// Every base output must keep its position and type; appending is allowed.
    Prefix,
    /// Any difference in the output sequence is a change, reordering included.
    Strict,
    /// Arity and type changes are changes; a pure reordering is reported
    /// separately with lower severity.
    #[default]
    Refined,
}

impl RuleGeneration {
    /// Get the string identifier for this generation
    pub fn id(&self) -> &'static str {
        match self {
            RuleGeneration::Prefix => "prefix",
            RuleGeneration::Strict => "strict",
            RuleGeneration::Refined => "refined",
        }
    }

    /// Get the description for this generation
    pub fn description(&self) -> &'static str {
        match self {
            RuleGeneration::Prefix => {
                "Base return types must be a positional prefix of the new return types."
            }
            RuleGeneration::Strict => "Return types must be identical, order included.",
            RuleGeneration::Refined => {
                "Return types must keep their arity and types; reordering is reported as a warning."
            }
        }
    }

    /// Parse generation from string ID
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "prefix" => Some(RuleGeneration::Prefix),
            "strict" => Some(RuleGeneration::Strict),
            "refined" => Some(RuleGeneration::Refined),
            _ => None,
        }
    }

    /// Get all available generations, oldest first
    pub fn all() -> Vec<Self> {
        vec![
            RuleGeneration::Prefix,
            RuleGeneration::Strict,
            RuleGeneration::Refined,
        ]
    }
}

impl std::fmt::Display for RuleGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for RuleGeneration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| format!("Unknown rule generation: {s}"))
    }
}
