mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::write_input;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin("sentiq").unwrap()
}

// --- Help & version ---

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sentiment analysis"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sentiq"));
}

#[test]
fn missing_input_arg() {
    cmd().assert().failure();
}

// --- Input errors (reported before any credential lookup) ---

#[test]
fn nonexistent_input_file() {
    cmd()
        .arg("/definitely/not/here.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn csv_without_comment_column() {
    let (_dir, path) = write_input("data.csv", "id,feedback\n1,hello\n");
    cmd()
        .arg(path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("'comment' column"));
}

#[test]
fn empty_text_input() {
    let (_dir, path) = write_input("data.txt", "\n   \n");
    cmd()
        .arg(path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no usable comments"));
}

#[test]
fn malformed_json_input() {
    let (_dir, path) = write_input("data.json", "{\"not\": \"an array\"}");
    cmd()
        .arg(path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON array"));
}

#[test]
fn unknown_format_flag() {
    let (_dir, path) = write_input("data.txt", "a comment\n");
    cmd()
        .arg(path)
        .args(["--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn format_flag_overrides_extension() {
    // A .txt file forced to CSV must be rejected for the missing column.
    let (_dir, path) = write_input("data.txt", "id,feedback\n1,hi\n");
    cmd()
        .arg(path)
        .args(["--format", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'comment' column"));
}

#[test]
fn themes_conflicts_with_no_themes() {
    let (_dir, path) = write_input("data.txt", "a comment\n");
    cmd()
        .arg(path)
        .args(["--themes", "3", "--no-themes"])
        .assert()
        .failure();
}

// --- Credential resolution ---

#[test]
fn missing_api_key_reported_after_valid_input() {
    let home = tempfile::TempDir::new().unwrap();
    let (_dir, path) = write_input("data.txt", "a perfectly fine comment\n");
    cmd()
        .arg(path)
        .args(["--api-key-env", "SENTIQ_BINARY_TEST_KEY"])
        .env_remove("SENTIQ_BINARY_TEST_KEY")
        .env("HOME", home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key not found"));
}

#[test]
fn missing_explicit_config_file() {
    let (_dir, path) = write_input("data.txt", "a comment\n");
    cmd()
        .arg(path)
        .args(["--config", "/definitely/not/here.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
