//! End-to-end verification scenarios over file-backed artifacts.

use std::fs;

use ftlcheck::artifact::{FORMAT_VERSION, MAGIC};
use ftlcheck::{encode_artifact, FileProvider, VerificationResult, Verifier};

const FIXTURE: &str = r#"{
    "name": "freemarker",
    "rules": {
        "template": {
            "type": "REPEAT",
            "content": {
                "type": "CHOICE",
                "members": [
                    {"type": "SYMBOL", "name": "if_clause"},
                    {"type": "SYMBOL", "name": "interpolation"},
                    {"type": "SYMBOL", "name": "comment"},
                    {"type": "SYMBOL", "name": "text"}
                ]
            }
        },
        "if_clause": {
            "type": "SEQ",
            "members": [
                {"type": "SYMBOL", "name": "if_begin"},
                {"type": "SYMBOL", "name": "template"},
                {"type": "SYMBOL", "name": "if_close"}
            ]
        },
        "if_begin": {"type": "STRING", "value": "<#if"},
        "if_close": {"type": "STRING", "value": "</#if>"},
        "interpolation": {
            "type": "SEQ",
            "members": [
                {"type": "STRING", "value": "${"},
                {"type": "SYMBOL", "name": "variable"},
                {"type": "STRING", "value": "}"}
            ]
        },
        "variable": {"type": "PATTERN", "value": "[A-Za-z_][A-Za-z0-9_]*"},
        "text": {"type": "PATTERN", "value": "[^<$]+"}
    },
    "externals": [
        {"type": "SYMBOL", "name": "comment"}
    ]
}"#;

fn verify_file(bytes: &[u8]) -> VerificationResult {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("freemarker.ftlg");
    fs::write(&path, bytes).unwrap();
    Verifier::new(FileProvider::new(&path)).verify()
}

#[test]
fn test_can_load_grammar() {
    let result = verify_file(&encode_artifact(FIXTURE));
    assert!(result.is_ok(), "{:?}", result.failure_reason());
}

#[test]
fn test_verification_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("freemarker.ftlg");
    fs::write(&path, encode_artifact(FIXTURE)).unwrap();

    let verifier = Verifier::new(FileProvider::new(&path));
    let first = verifier.verify();
    let second = verifier.verify();
    assert!(first.is_ok());
    assert_eq!(first, second);
}

#[test]
fn test_empty_artifact_fails() {
    let result = verify_file(&[]);
    let reason = result.failure_reason().unwrap();
    assert!(
        reason.starts_with("Error loading Freemarker grammar"),
        "unexpected reason: {reason}"
    );
}

#[test]
fn test_truncated_artifact_fails() {
    let mut bytes = encode_artifact(FIXTURE);
    bytes.truncate(bytes.len() / 3);
    let result = verify_file(&bytes);
    assert!(!result.is_ok());
}

#[test]
fn test_incompatible_format_version_fails() {
    let mut bytes = encode_artifact(FIXTURE);
    bytes[4..6].copy_from_slice(&(FORMAT_VERSION + 7).to_le_bytes());
    let result = verify_file(&bytes);
    let reason = result.failure_reason().unwrap();
    assert!(reason.contains("format version"), "unexpected reason: {reason}");
}

#[test]
fn test_wrong_magic_fails() {
    let mut bytes = encode_artifact(FIXTURE);
    bytes[..4].copy_from_slice(b"WASM");
    assert_ne!(&bytes[..4], MAGIC.as_slice());
    let result = verify_file(&bytes);
    assert!(result.failure_reason().unwrap().contains("magic"));
}

#[test]
fn test_corrupt_payload_fails() {
    let mut bytes = encode_artifact(FIXTURE);
    let mid = bytes.len() / 2;
    bytes[mid] = 0xFF;
    let result = verify_file(&bytes);
    assert!(!result.is_ok());
}

#[test]
fn test_undefined_symbol_fails() {
    let artifact = encode_artifact(
        r#"{
            "name": "freemarker",
            "rules": {
                "template": {"type": "SYMBOL", "name": "list_clause"}
            }
        }"#,
    );
    let result = verify_file(&artifact);
    let reason = result.failure_reason().unwrap();
    assert!(reason.contains("list_clause"), "unexpected reason: {reason}");
}

#[test]
fn test_missing_artifact_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("freemarker.ftlg");
    // no file written
    let result = Verifier::new(FileProvider::new(path)).verify();
    assert!(result.failure_reason().is_some());
}
