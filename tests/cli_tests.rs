// CLI behaviour: rendering documents, ids, plugin listing and error reports.
// Requires: assert_cmd, predicates, tempfile crates in [dev-dependencies]

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn prettify() -> Command {
    Command::cargo_bin("prettify").unwrap()
}

fn write_input(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn cli_renders_a_file_with_default_layout() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "value.yaml", "[1, 2]");

    prettify()
        .arg("render")
        .arg(&input)
        .assert()
        .success()
        .stdout("[\n  1, \n  2\n]\n");
}

#[test]
fn cli_renders_stdin_when_no_file_is_given() {
    prettify()
        .arg("render")
        .write_stdin("{b: 2, a: 1}")
        .assert()
        .success()
        .stdout("{\n  'a': 1, \n  'b': 2\n}\n");
}

#[test]
fn cli_single_line_and_indent_flags() {
    prettify()
        .args(["render", "--single-line"])
        .write_stdin("[1, 2]")
        .assert()
        .success()
        .stdout("[1, 2]\n");

    prettify()
        .args(["render", "--indent", "4"])
        .write_stdin("[1, 2]")
        .assert()
        .success()
        .stdout("[\n    1, \n    2\n]\n");
}

#[test]
fn cli_reads_layout_from_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_input(&dir, "layout.yaml", "indent: 3\n");

    prettify()
        .arg("render")
        .arg("--config")
        .arg(&config)
        .write_stdin("[1, 2]")
        .assert()
        .success()
        .stdout("[\n   1, \n   2\n]\n");
}

#[test]
fn cli_rejects_unknown_config_keys() {
    let dir = TempDir::new().unwrap();
    let config = write_input(&dir, "layout.yaml", "tabs: true\n");

    prettify()
        .arg("render")
        .arg("--config")
        .arg(&config)
        .write_stdin("[1]")
        .assert()
        .failure()
        .stderr(contains("prettifier::config"));
}

#[test]
fn cli_id_is_single_line() {
    prettify()
        .arg("id")
        .write_stdin("- 1\n- {a: 2, b: 3}\n")
        .assert()
        .success()
        .stdout("[1, {'a': 2, 'b': 3}]\n");
}

#[test]
fn cli_understands_tagged_values() {
    prettify()
        .arg("id")
        .write_stdin("[!set [2, 1], !tuple [a], !duration 61]")
        .assert()
        .success()
        .stdout("[set([1, 2]), ('a'), 61.0]\n");
}

#[test]
fn cli_lists_plugins_with_their_classes() {
    prettify()
        .arg("plugins")
        .assert()
        .success()
        .stdout(contains("object").and(contains("builtins.str")).and(contains("unittest.mock.Mock")));
}

#[test]
fn cli_reports_miette_diagnostics_on_bad_input() {
    prettify()
        .arg("render")
        .write_stdin("[1, 2")
        .assert()
        .failure()
        .stderr(contains("prettifier::input").or(contains("help:")));
}

#[test]
fn cli_reports_missing_files() {
    let dir = TempDir::new().unwrap();
    prettify()
        .arg("render")
        .arg(dir.path().join("missing.yaml"))
        .assert()
        .failure()
        .stderr(contains("prettifier::io"));
}
