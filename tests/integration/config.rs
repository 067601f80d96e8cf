use predicates::prelude::*;

use crate::common::{ModFileFixture, PinProject, pinned_lines};

#[test]
fn test_config_excludes_apply() {
    let project = PinProject::with_fixture(&ModFileFixture::basic()).unwrap();
    let original = project.read_manifest();
    let config = project.write_config("excludes = [\"github.com/pkg/errors\"]\n").unwrap();

    project.run_pin(&["--config", config.to_str().unwrap()]).assert_success();

    let updated = project.read_manifest();
    assert_eq!(
        pinned_lines(&updated[original.len()..]),
        vec!["\tgolang.org/x/sys => golang.org/x/sys v0.16.0"]
    );
}

#[test]
fn test_config_excludes_survive_no_default_excludes() {
    let project = PinProject::with_fixture(&ModFileFixture::basic()).unwrap();
    let original = project.read_manifest();
    let config = project.write_config("excludes = [\"golang.org/x/sys\"]\n").unwrap();

    project
        .run_pin(&["--no-default-excludes", "--config", config.to_str().unwrap()])
        .assert_success();

    let updated = project.read_manifest();
    assert_eq!(
        pinned_lines(&updated[original.len()..]),
        vec!["\tgithub.com/pkg/errors => github.com/pkg/errors v0.9.1"]
    );
}

#[test]
fn test_config_replaces_default_excludes() {
    let project = PinProject::with_fixture(&ModFileFixture::only_default_excluded()).unwrap();
    let original = project.read_manifest();
    let config = project.write_config("default_excludes = []\n").unwrap();

    project.run_pin(&["--config", config.to_str().unwrap()]).assert_success();

    assert_eq!(pinned_lines(&project.read_manifest()[original.len()..]).len(), 1);
}

#[test]
fn test_config_from_environment() {
    let project = PinProject::with_fixture(&ModFileFixture::basic()).unwrap();
    let original = project.read_manifest();
    let config = project
        .write_config("excludes = [\"github.com/pkg/errors\", \"golang.org/x/sys\"]\n")
        .unwrap();

    let mut cmd = project.command();
    cmd.env("GOMODPIN_CONFIG_PATH", &config).arg(project.manifest_path());
    cmd.assert().success();

    assert_eq!(project.read_manifest(), original);
}

#[test]
fn test_missing_explicit_config_fails() {
    let project = PinProject::with_fixture(&ModFileFixture::basic()).unwrap();

    let mut cmd = project.command();
    cmd.args(["--config", "does-not-exist.toml"]).arg(project.manifest_path());

    cmd.assert().code(1).stderr(predicate::str::contains("config file not found"));
    assert!(!project.backup_path().exists());
}

#[test]
fn test_invalid_config_fails() {
    let project = PinProject::with_fixture(&ModFileFixture::basic()).unwrap();
    let config = project.write_config("exclude = [\"typo\"]\n").unwrap();

    let mut cmd = project.command();
    cmd.arg("--config").arg(&config).arg(project.manifest_path());

    cmd.assert().code(1).stderr(predicate::str::contains("unknown field"));
    assert!(!project.backup_path().exists());
}
