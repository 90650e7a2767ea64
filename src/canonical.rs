use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

//==============================================================================
// Node Interface Model
//==============================================================================

/// The declared shape of one required input.
///
/// Only `type_name` takes part in compatibility checks; everything else a
/// manifest attaches to an input (defaults, ranges, tooltips) is kept in
/// `config` for diagnostics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InputSpec {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, serde_json::Value>,
}

impl InputSpec {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            config: BTreeMap::new(),
        }
    }
}

/// The public interface of a single declared node.
///
/// Absent fields are always represented by their empty value, so two nodes can
/// be compared without caring which fields the source actually spelled out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeDefinition {
    pub name: String,
    /// Positional output types. Duplicates are legal.
    #[serde(default)]
    pub return_types: Vec<String>,
    #[serde(default)]
    pub required_inputs: IndexMap<String, InputSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
}

impl NodeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_return_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.return_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_input(mut self, name: impl Into<String>, spec: InputSpec) -> Self {
        self.required_inputs.insert(name.into(), spec);
        self
    }

    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = Some(entry_point.into());
        self
    }
}

//==============================================================================
// Registry
//==============================================================================

/// Every node one plugin version declares, keyed by node name.
///
/// Iteration follows declaration order, which is what makes diff output
/// stable across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Registry {
    nodes: IndexMap<String, NodeDefinition>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, replacing any earlier node with the same name.
    pub fn insert(&mut self, node: NodeDefinition) {
        self.nodes.insert(node.name.clone(), node);
    }

    pub fn get(&self, name: &str) -> Option<&NodeDefinition> {
        self.nodes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeDefinition> {
        self.nodes.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// An order-independent view used for fingerprinting: nodes and inputs are
    /// keyed by name in sorted order.
    pub fn to_sorted(&self) -> BTreeMap<&str, SortedNode<'_>> {
        self.nodes
            .iter()
            .map(|(name, node)| {
                let inputs = node
                    .required_inputs
                    .iter()
                    .map(|(input, spec)| (input.as_str(), spec))
                    .collect();
                (
                    name.as_str(),
                    SortedNode {
                        return_types: &node.return_types,
                        required_inputs: inputs,
                        entry_point: node.entry_point.as_deref(),
                    },
                )
            })
            .collect()
    }
}

impl FromIterator<NodeDefinition> for Registry {
    fn from_iter<T: IntoIterator<Item = NodeDefinition>>(iter: T) -> Self {
        let mut registry = Registry::new();
        for node in iter {
            registry.insert(node);
        }
        registry
    }
}

/// Borrowed, name-sorted projection of a node.
#[derive(Debug, Serialize)]
pub struct SortedNode<'a> {
    pub return_types: &'a [String],
    pub required_inputs: BTreeMap<&'a str, &'a InputSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<&'a str>,
}
