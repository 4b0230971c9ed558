//! Integration tests for the `cxfront check` command

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn cxfront() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cxfront"))
}

/// Helper function to create a test file
fn create_test_file(
    dir: &TempDir,
    name: &str,
    content: &str,
) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// `while ( i < 3 ) i ++ ;` for a void routine with `i` in scope
const VALID_BODY: &str = r#"{
  "routine": { "name": "main", "return_type": { "form": "Void" } },
  "variables": [ { "name": "i", "ty": { "form": { "Scalar": "Integer" } } } ],
  "tokens": [
    { "kind": "KwWhile", "span": { "start": { "line": 1, "column": 1 }, "end": { "line": 1, "column": 6 } } },
    { "kind": "LParen" },
    { "kind": { "Identifier": "i" } },
    { "kind": "Lt" },
    { "kind": { "IntLiteral": 3 } },
    { "kind": "RParen" },
    { "kind": { "Identifier": "i" } },
    { "kind": "PlusPlus" },
    { "kind": "Semicolon" }
  ]
}"#;

/// `return 1.5 ;` for a void routine
const INVALID_BODY: &str = r#"{
  "routine": { "name": "main", "return_type": { "form": "Void" } },
  "tokens": [
    { "kind": "KwReturn", "span": { "start": { "line": 2, "column": 3 }, "end": { "line": 2, "column": 9 } } },
    { "kind": { "FloatLiteral": 1.5 }, "span": { "start": { "line": 2, "column": 10 }, "end": { "line": 2, "column": 13 } } },
    { "kind": "Semicolon" }
  ]
}"#;

#[test]
fn test_check_valid_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = create_test_file(&temp_dir, "valid.json", VALID_BODY);

    let output = cxfront().arg("check").arg(&file).output().unwrap();

    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_check_dump_prints_markers() {
    let temp_dir = TempDir::new().unwrap();
    let file = create_test_file(&temp_dir, "valid.json", VALID_BODY);

    let output = cxfront()
        .args(["check", "--dump", "--no-line-markers"])
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("@-> 9"), "{}", stdout);
    assert!(stdout.contains("while"));
}

#[test]
fn test_check_invalid_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = create_test_file(&temp_dir, "invalid.json", INVALID_BODY);
    let config = create_test_file(&temp_dir, "plain.toml", "[diagnostics]\ncolors = false\n");

    let output = cxfront()
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg(&file)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Incompatible types"), "{}", stderr);
    assert!(stderr.contains("invalid.json:2:10"), "{}", stderr);
    assert!(stderr.contains("1 syntax error(s)"), "{}", stderr);
}

#[test]
fn test_check_malformed_json() {
    let temp_dir = TempDir::new().unwrap();
    let file = create_test_file(&temp_dir, "broken.json", "{ \"tokens\": [");

    let output = cxfront().arg("check").arg(&file).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid token stream") || stderr.contains("Failed"));
}

#[test]
fn test_check_missing_file() {
    let output = cxfront()
        .args(["check", "does-not-exist.json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_version_command() {
    let output = cxfront().arg("version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("cxfront "));
}
