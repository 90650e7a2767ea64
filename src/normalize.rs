//! Converts a raw declaration manifest, as written by plugin authors, into the
//! canonical `Registry` representation.
//!
//! Manifests come in a few spellings: the snake_case keys used by this tool,
//! and the upper-case attribute names plugins historically declared on their
//! node classes (`RETURN_TYPES`, `FUNCTION`, `INPUT_TYPES`). All of them end up
//! in the same shape, and any field a node leaves out becomes its empty value.

use crate::canonical::{InputSpec, NodeDefinition, Registry};
use crate::error::ManifestError;
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawNode {
    #[serde(alias = "RETURN_TYPES")]
    pub return_types: Option<Vec<serde_json::Value>>,
    #[serde(alias = "function", alias = "FUNCTION")]
    pub entry_point: Option<String>,
    #[serde(alias = "required")]
    pub required_inputs: Option<IndexMap<String, RawInputSpec>>,
    #[serde(rename = "INPUT_TYPES", alias = "input_types")]
    pub input_types: Option<RawInputTypes>,
}

/// The `INPUT_TYPES` section. Only `required` matters; `optional` and
/// `hidden` are accepted and dropped.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawInputTypes {
    pub required: Option<IndexMap<String, RawInputSpec>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawInputSpec {
    /// `"INT"`
    Bare(String),
    /// `["INT", {"default": 0}]`
    Positional(Vec<serde_json::Value>),
    /// `{"type": "INT", "default": 0}`
    Keyed(serde_json::Map<String, serde_json::Value>),
}

/// Node keys a manifest may use, so a bare node called `nodes` is never taken
/// for the wrapped `{"nodes": {...}}` form.
const NODE_FIELDS: &[&str] = &[
    "return_types",
    "RETURN_TYPES",
    "entry_point",
    "function",
    "FUNCTION",
    "required_inputs",
    "required",
    "INPUT_TYPES",
    "input_types",
];

/// Top-level manifest before the wrapped/bare form is decided.
pub type RawManifest = IndexMap<String, serde_json::Value>;

/// Parses a JSON manifest into a registry.
pub fn parse_json(content: &str) -> Result<Registry, ManifestError> {
    let raw: Option<RawManifest> = serde_json::from_str(content)?;
    normalize_manifest(raw.unwrap_or_default())
}

/// Parses a YAML manifest into a registry.
pub fn parse_yaml(content: &str) -> Result<Registry, ManifestError> {
    // Blank and null documents are plugins that declare nothing.
    if content.trim().is_empty() {
        return Ok(Registry::new());
    }
    let raw: Option<RawManifest> = serde_yaml::from_str(content)?;
    normalize_manifest(raw.unwrap_or_default())
}

/// Normalizes either `{"nodes": {...}}` or a bare map of nodes.
///
/// The wrapped form is recognised only when `nodes` is the sole top-level key
/// and its value is a map that does not itself look like a node.
pub fn normalize_manifest(mut raw: RawManifest) -> Result<Registry, ManifestError> {
    let wrapped = raw.len() == 1
        && match raw.get("nodes") {
            Some(serde_json::Value::Null) => true,
            Some(serde_json::Value::Object(inner)) => {
                !inner.keys().any(|key| NODE_FIELDS.contains(&key.as_str()))
            }
            _ => false,
        };

    let nodes: Vec<(String, serde_json::Value)> = if wrapped {
        match raw.swap_remove("nodes") {
            Some(serde_json::Value::Object(inner)) => inner.into_iter().collect(),
            _ => Vec::new(),
        }
    } else {
        raw.into_iter().collect()
    };

    let mut registry = Registry::new();
    for (name, value) in nodes {
        let node = if value.is_null() {
            RawNode::default()
        } else {
            serde_json::from_value(value).map_err(|source| ManifestError::Node {
                node: name.clone(),
                source,
            })?
        };
        registry.insert(normalize_node(name, node));
    }

    tracing::debug!(nodes = registry.len(), wrapped, "normalized manifest");
    Ok(registry)
}

fn normalize_node(name: String, raw: RawNode) -> NodeDefinition {
    let return_types = raw
        .return_types
        .unwrap_or_default()
        .iter()
        .map(type_tag)
        .collect();

    let inputs = raw
        .required_inputs
        .or_else(|| raw.input_types.and_then(|section| section.required))
        .unwrap_or_default();

    let required_inputs = inputs
        .into_iter()
        .map(|(input, spec)| (input, normalize_input(spec)))
        .collect();

    NodeDefinition {
        name,
        return_types,
        required_inputs,
        entry_point: raw.entry_point,
    }
}

fn normalize_input(raw: RawInputSpec) -> InputSpec {
    match raw {
        RawInputSpec::Bare(type_name) => InputSpec::new(type_name),
        RawInputSpec::Positional(items) => {
            let mut items = items.into_iter();
            let type_name = items.next().map(|v| type_tag(&v)).unwrap_or_default();
            let config = match items.next() {
                Some(serde_json::Value::Object(map)) => map.into_iter().collect(),
                _ => BTreeMap::new(),
            };
            InputSpec { type_name, config }
        }
        RawInputSpec::Keyed(mut map) => {
            let type_name = map.remove("type").map(|v| type_tag(&v)).unwrap_or_default();
            InputSpec {
                type_name,
                config: map.into_iter().collect(),
            }
        }
    }
}

/// Type tags are strings; anything else (a list of choices, say) is compared
/// by its compact JSON text.
fn type_tag(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
