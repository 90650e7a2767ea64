//! Tests for YAML configuration loading and parsing

use node_sign::compat::{BreakingConfig, RuleGeneration};

#[test]
fn test_load_yaml_config() {
    let yaml_content = r#"
version: v1
breaking:
  generation: strict
  except_rules:
    - ENTRY_POINT_SAME
  ignore_nodes:
    - DebugPreview
    - LegacyLoader
  flag_added_required_inputs: true
"#;

    let config = BreakingConfig::from_yaml_str(yaml_content).unwrap();

    assert_eq!(config.generation, RuleGeneration::Strict);
    assert_eq!(config.except_rules, vec!["ENTRY_POINT_SAME"]);
    assert_eq!(config.ignore_nodes, vec!["DebugPreview", "LegacyLoader"]);
    assert!(config.flag_added_required_inputs);
    assert!(!config.is_rule_enabled("ENTRY_POINT_SAME"));
    assert!(config.is_rule_enabled("NODE_NO_DELETE"));
    assert!(config.is_node_ignored("LegacyLoader"));
}

#[test]
fn test_load_minimal_yaml_config() {
    let yaml_content = r#"
version: v1
breaking:
  generation: prefix
"#;

    let config = BreakingConfig::from_yaml_str(yaml_content).unwrap();

    assert_eq!(config.generation, RuleGeneration::Prefix);
    assert!(config.except_rules.is_empty());
    assert!(config.ignore_nodes.is_empty());
    assert!(!config.flag_added_required_inputs);
}

#[test]
fn test_load_empty_yaml_config() {
    let yaml_content = r#"
version: v1
"#;

    let config = BreakingConfig::from_yaml_str(yaml_content).unwrap();

    // Should use default values
    assert_eq!(config, BreakingConfig::default());
    assert_eq!(config.generation, RuleGeneration::Refined);
}

#[test]
fn test_load_rules_only_config() {
    let yaml_content = r#"
version: v1
breaking:
  use_rules:
    - NODE_NO_DELETE
    - REQUIRED_INPUT_SAME
"#;

    let config = BreakingConfig::from_yaml_str(yaml_content).unwrap();

    assert_eq!(config.use_rules, vec!["NODE_NO_DELETE", "REQUIRED_INPUT_SAME"]);
    assert!(config.is_rule_enabled("REQUIRED_INPUT_SAME"));
    assert!(!config.is_rule_enabled("RETURN_TYPES_SAME"));
}

#[test]
fn test_unknown_generation_is_rejected() {
    let yaml_content = r#"
breaking:
  generation: newest
"#;

    assert!(BreakingConfig::from_yaml_str(yaml_content).is_err());
}

#[test]
fn test_load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node-sign.yaml");
    std::fs::write(&path, "breaking:\n  generation: strict\n").unwrap();

    let config = BreakingConfig::from_yaml_file(&path).unwrap();
    assert_eq!(config.generation, RuleGeneration::Strict);

    assert!(BreakingConfig::from_yaml_file(dir.path().join("missing.yaml")).is_err());
}
