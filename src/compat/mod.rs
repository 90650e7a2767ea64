//! Breaking change detection between two node registries
//!
//! Rules live in small per-concern modules and are wired together by the rule
//! registry; the engine walks the base registry and applies whichever rules
//! the `BreakingConfig` selects.

pub mod engine;
pub mod generation;
pub mod input_rules;
pub mod node_rules;
pub mod return_type_rules;
pub mod rule_registry;
pub mod types;

pub use engine::{BreakingConfig, BreakingEngine, BreakingResult, diff};
pub use generation::RuleGeneration;
pub use types::{BreakingChange, BreakingSeverity, ChangeKind};
