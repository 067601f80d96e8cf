use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

use crate::common::{ModFileFixture, PinProject};

#[test]
fn test_help_lists_flags() {
    let mut cmd = Command::cargo_bin("gomodpin").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--no-default-excludes"))
        .stdout(predicate::str::contains("--exclude"))
        .stdout(predicate::str::contains("<MANIFEST>"));
}

#[test]
fn test_missing_manifest_argument_is_usage_error() {
    let mut cmd = Command::cargo_bin("gomodpin").unwrap();

    cmd.assert().code(2).stderr(predicate::str::contains("<MANIFEST>"));
}

#[test]
fn test_two_manifest_arguments_is_usage_error() {
    let mut cmd = Command::cargo_bin("gomodpin").unwrap();
    cmd.args(["a/go.mod", "b/go.mod"]);

    cmd.assert().code(2);
}

#[test]
fn test_nonexistent_path() {
    let project = PinProject::new().unwrap();

    let output = project.run_pin(&[]);
    output.assert_failure().assert_stderr_contains("error accessing path");
    assert!(!project.backup_path().exists());
}

#[test]
fn test_directory_path() {
    let project = PinProject::new().unwrap();

    let mut cmd = project.command();
    cmd.arg(project.project_path());

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("provided path is a directory"))
        .stderr(predicate::str::contains("go.mod"));
}

#[test]
fn test_wrong_file_name() {
    let project = PinProject::new().unwrap();
    let other = project.project_path().join("deps.mod");
    fs::write(&other, ModFileFixture::basic().content).unwrap();

    let mut cmd = project.command();
    cmd.arg(&other);

    cmd.assert().code(1).stderr(predicate::str::contains(
        "provided path must be a go.mod file; got \"deps.mod\"",
    ));
    assert!(!project.project_path().join("go.mod.old").exists());
    assert!(!project.project_path().join("deps.mod.old").exists());
}

#[test]
fn test_parse_error_reports_lines_and_writes_nothing() {
    let project = PinProject::with_fixture(&ModFileFixture::invalid_syntax()).unwrap();
    let original = project.read_manifest();

    let output = project.run_pin(&[]);
    output
        .assert_failure()
        .assert_stderr_contains("error parsing")
        .assert_stderr_contains("go.mod:3: usage: require module/path v1.2.3");

    assert!(!project.backup_path().exists());
    assert_eq!(project.read_manifest(), original);
}

#[test]
fn test_default_run_is_quiet() {
    let project = PinProject::with_fixture(&ModFileFixture::basic()).unwrap();

    let output = project.run_pin(&[]);
    output.assert_success();
    assert!(output.stdout.is_empty(), "unexpected stdout: {}", output.stdout);
}

#[test]
fn test_verbose_run_logs_progress() {
    let project = PinProject::with_fixture(&ModFileFixture::self_replace_and_exclude()).unwrap();

    project
        .run_pin(&["--verbose"])
        .assert_success()
        .assert_stdout_contains("Replacing: example.com/a with v1.1.0")
        .assert_stdout_contains("Excluding (from go.mod exclude) example.com/b/v2@v2.0.0")
        .assert_stdout_contains("Backed up")
        .assert_stdout_contains("Appended 1 replacements to");
}

#[test]
fn test_rust_log_overrides_default_level() {
    let project = PinProject::with_fixture(&ModFileFixture::basic()).unwrap();

    let mut cmd = project.command();
    cmd.env("RUST_LOG", "info").arg(project.manifest_path());

    cmd.assert().success().stdout(predicate::str::contains("Appended 2 replacements"));
}
