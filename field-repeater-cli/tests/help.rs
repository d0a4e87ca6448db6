use assert_cmd::cargo::{self};
use predicates::str::contains;

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!("field-repeater");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("--store"))
        .stdout(contains("--dump"));
}

#[test]
fn store_is_required() {
    let mut cmd = cargo::cargo_bin_cmd!("field-repeater");
    cmd.assert().failure().stderr(contains("--store"));
}
