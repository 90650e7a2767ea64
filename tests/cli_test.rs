//! Integration tests for the node-sign CLI
//!
//! Runs the built binary against plugin directories in temp dirs.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

const BASE: &str = r#"{"nodes": {
    "Load": {"return_types": ["IMAGE"], "entry_point": "load",
             "required_inputs": {"path": {"type": "STRING"}}},
    "Save": {"entry_point": "save", "required_inputs": {"image": {"type": "IMAGE"}}}
}}"#;

const PR_WITHOUT_SAVE: &str = r#"{"nodes": {
    "Load": {"return_types": ["IMAGE"], "entry_point": "load",
             "required_inputs": {"path": {"type": "STRING"}}}
}}"#;

const PR_WITH_CROP: &str = r#"{"nodes": {
    "Load": {"return_types": ["IMAGE"], "entry_point": "load",
             "required_inputs": {"path": {"type": "STRING"}}},
    "Save": {"entry_point": "save", "required_inputs": {"image": {"type": "IMAGE"}}},
    "Crop": {"return_types": ["IMAGE"], "entry_point": "crop"}
}}"#;

fn run_node_sign(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_node-sign"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute node-sign")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Create `base/` and `pr/` plugin directories holding the given manifests
fn setup_plugins(base: &str, pr: &str) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    for (dir, manifest) in [("base", base), ("pr", pr)] {
        let path = temp.path().join(dir);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("node_registry.json"), manifest).unwrap();
    }
    temp
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_identical_plugins_succeeds() {
    let temp = setup_plugins(BASE, BASE);

    let output = run_node_sign(temp.path(), &["check", "base", "pr"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("No breaking changes detected."));
}

#[test]
fn test_check_removed_node_fails() {
    let temp = setup_plugins(BASE, PR_WITHOUT_SAVE);

    let output = run_node_sign(temp.path(), &["check", "base", "pr"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Breaking changes detected:"));
    assert!(out.contains("Node: Save"));
    assert!(out.contains("[NODE_REMOVED]"));
    assert!(!out.contains("Node: Load"));
}

#[test]
fn test_check_json_output() {
    let temp = setup_plugins(BASE, PR_WITHOUT_SAVE);

    let output = run_node_sign(temp.path(), &["check", "base", "pr", "--format", "json"]);

    assert_eq!(output.status.code(), Some(1));
    let result: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(result["has_breaking_changes"], true);
    assert_eq!(result["summary"]["NODE_REMOVED"], 1);
    assert_eq!(result["changes"][0]["node_name"], "Save");
}

#[test]
fn test_check_except_rules_flag() {
    let temp = setup_plugins(BASE, PR_WITHOUT_SAVE);

    let output = run_node_sign(
        temp.path(),
        &["check", "base", "pr", "--except-rules", "NODE_NO_DELETE"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("No breaking changes detected."));
}

#[test]
fn test_check_missing_manifest_fails() {
    let temp = setup_plugins(BASE, BASE);
    fs::create_dir_all(temp.path().join("empty")).unwrap();

    let output = run_node_sign(temp.path(), &["check", "base", "empty"]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("No node registry manifest found"));
}

#[test]
fn test_check_malformed_node_names_it() {
    let temp = setup_plugins(BASE, r#"{"Load": {"return_types": "IMAGE"}}"#);

    let output = run_node_sign(temp.path(), &["check", "base", "pr"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("node 'Load'"));
}

// ============================================================================
// compare / fingerprint
// ============================================================================

#[test]
fn test_compare_levels() {
    let temp = setup_plugins(BASE, PR_WITH_CROP);

    let green = run_node_sign(temp.path(), &["compare", "base", "base"]);
    assert!(green.status.success());
    assert!(stdout(&green).starts_with("Green"));

    let yellow = run_node_sign(temp.path(), &["compare", "base", "pr"]);
    assert!(yellow.status.success());
    assert!(stdout(&yellow).starts_with("Yellow"));

    let red = run_node_sign(temp.path(), &["compare", "pr", "base"]);
    assert_eq!(red.status.code(), Some(1));
    assert!(stdout(&red).starts_with("Red"));
}

#[test]
fn test_fingerprint_prints_sha256_hex() {
    let temp = setup_plugins(BASE, BASE);

    let first = run_node_sign(temp.path(), &["fingerprint", "base"]);
    let second = run_node_sign(temp.path(), &["fingerprint", "pr/node_registry.json"]);

    assert!(first.status.success());
    let fingerprint = stdout(&first).trim().to_string();
    assert_eq!(fingerprint.len(), 64);
    assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(fingerprint, stdout(&second).trim());
}
