use std::fs;

use assert_cmd::cargo::{self};
use predicates::str::contains;
use serde_json::{Value, json};

#[test]
fn dump_normalizes_missing_field_to_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entry.json");
    fs::write(&path, r#"{"title":"Acme"}"#).unwrap();

    let mut cmd = cargo::cargo_bin_cmd!("field-repeater");
    cmd.args(["--store", path.to_str().unwrap(), "--pointer", "/fields/links", "--dump"])
        .assert()
        .success()
        .stdout(contains("[]"));

    let document: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document, json!({"title": "Acme", "fields": {"links": []}}));
}

#[test]
fn dump_prints_entries_in_index_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.json");
    let stored = json!([
        {"id": "b", "value": "second", "index": 1},
        {"id": "a", "value": "first", "type": "home", "index": 0}
    ]);
    fs::write(&path, stored.to_string()).unwrap();

    let output = cargo::cargo_bin_cmd!("field-repeater")
        .args(["--store", path.to_str().unwrap(), "--dump"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed[0]["id"], "a");
    assert_eq!(printed[0]["type"], "home");
    assert_eq!(printed[1]["id"], "b");
}

#[test]
fn dump_rejects_malformed_params() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.json");
    cargo::cargo_bin_cmd!("field-repeater")
        .args(["--store", path.to_str().unwrap(), "--params", "{oops", "--dump"])
        .assert()
        .failure()
        .stderr(contains("params are not valid JSON"));
}
