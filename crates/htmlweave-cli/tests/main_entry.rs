//! Integration tests for the `htmlweave` binary entry point.
//!
//! Runs the compiled binary against documents on disk and checks the module
//! it prints and the errors it reports.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use tempfile::TempDir;

#[test]
fn compiles_a_document_to_standard_output() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("logo.png"), "png").expect("write image");
    fs::write(dir.path().join("index.html"), "<img src=\"logo.png\">").expect("write page");

    let mut command = cargo_bin_cmd!("htmlweave");
    command.arg(dir.path().join("index.html"));
    command
        .assert()
        .success()
        .stdout(contains("from \"./logo.png\";"))
        .stdout(contains("export default code;"));
}

#[test]
fn configuration_flags_select_commonjs() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("index.html"), "<p>plain</p>").expect("write page");

    let mut command = cargo_bin_cmd!("htmlweave");
    command
        .arg("--module-format")
        .arg("commonjs")
        .arg(dir.path().join("index.html"));
    command
        .assert()
        .success()
        .stdout(contains("module.exports = code;"));
}

#[test]
fn unresolved_references_exit_with_failure() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("index.html"), "<img src=\"gone.png\">").expect("write page");

    let mut command = cargo_bin_cmd!("htmlweave");
    command.arg(dir.path().join("index.html"));
    command
        .assert()
        .failure()
        .stderr(contains("can't resolve './gone.png'"));
}

#[test]
fn missing_input_exits_with_failure() {
    let mut command = cargo_bin_cmd!("htmlweave");
    command.arg("/definitely/not/here.html");
    command
        .assert()
        .failure()
        .stderr(contains("failed to read"));
}
