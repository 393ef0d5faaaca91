//! Integration tests for the pwd-changes binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::Builder;

#[allow(deprecated)]
fn get_cmd() -> Command {
    let mut cmd = Command::cargo_bin("pwd-changes").unwrap();
    cmd.env_remove("PWD_COMMON_PASSWORDS_PATH");
    cmd
}

fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn selftest_builtin_table_passes() {
    get_cmd()
        .arg("selftest")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Results: 34/34 passed"))
        .stdout(predicate::str::contains(
            "Input: \"ab1234567AB\"  -  Expected: 4  -  Output: 4  -  Pass: true",
        ));
}

#[test]
fn selftest_reports_failures_with_exit_code() {
    let cases = temp_file(
        ".toml",
        "[[cases]]\ninput = \"aA1\"\nexpected = 4\n\n[[cases]]\ninput = \"aA1\"\nexpected = 0\n",
    );

    get_cmd()
        .args(["selftest", "--cases"])
        .arg(cases.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Pass: false"))
        .stdout(predicate::str::contains("Test Results: 1/2 passed"));
}

#[test]
fn check_compliant_password() {
    get_cmd()
        .args(["check", "1377C0d3"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn check_prints_changes_and_reasons() {
    get_cmd()
        .args(["check", "1Ahellosummer"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("2\n"))
        .stdout(predicate::str::contains("hello, summer"));
}

#[test]
fn check_reads_stdin_when_no_arguments() {
    get_cmd()
        .arg("check")
        .write_stdin("z\naA1\n")
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("6\n"))
        .stdout(predicate::str::contains("\n4\n"));
}

#[test]
fn check_with_custom_index_and_policy() {
    let index = temp_file(".txt", "Secret\n");
    let policy = temp_file(".toml", "minimum_length = 10\nsuccession_length = 2\n");

    get_cmd()
        .arg("--index")
        .arg(index.path())
        .arg("--policy")
        .arg(policy.path())
        .args(["check", "Secrett9"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("4\n"));
}

#[test]
fn missing_index_is_a_configuration_error() {
    get_cmd()
        .args(["--index", "/nonexistent/index.toml", "check", "aA1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to load common passwords"));
}

#[test]
fn invalid_policy_is_a_configuration_error() {
    let policy = temp_file(".toml", "minimum_length = 30\n");

    get_cmd()
        .arg("--policy")
        .arg(policy.path())
        .args(["check", "aA1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("greater than maximum_length"));
}
