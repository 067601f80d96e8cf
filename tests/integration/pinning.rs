use crate::common::{ModFileFixture, PinProject, pinned_lines};

#[test]
fn test_pins_required_modules_sorted() {
    let project = PinProject::with_fixture(&ModFileFixture::basic()).unwrap();
    let original = project.read_manifest();

    project.run_pin(&[]).assert_success();

    let updated = project.read_manifest();
    assert_eq!(
        updated,
        format!(
            "{original}\n\n// prevent module upgrades\nreplace (\n\
             \tgithub.com/pkg/errors => github.com/pkg/errors v0.9.1\n\
             \tgolang.org/x/sys => golang.org/x/sys v0.16.0\n\
             )\n"
        )
    );
    assert_eq!(project.read_backup(), original);
}

#[test]
fn test_self_replace_and_manifest_exclude() {
    let project = PinProject::with_fixture(&ModFileFixture::self_replace_and_exclude()).unwrap();
    let original = project.read_manifest();

    project.run_pin(&[]).assert_success();

    let updated = project.read_manifest();
    let appended = &updated[original.len()..];
    assert_eq!(pinned_lines(appended), vec!["\texample.com/a => example.com/a v1.1.0"]);
}

#[test]
fn test_only_default_excluded_module_appends_nothing() {
    let project = PinProject::with_fixture(&ModFileFixture::only_default_excluded()).unwrap();
    let original = project.read_manifest();

    project
        .run_pin(&["-v"])
        .assert_success()
        .assert_stdout_contains("Excluding (from flags) github.com/DataDog/orchestrion")
        .assert_stdout_contains("No replacements to append");

    assert_eq!(project.read_manifest(), original);
    assert_eq!(project.read_backup(), original);
}

#[test]
fn test_no_default_excludes_pins_datadog_modules() {
    let project = PinProject::with_fixture(&ModFileFixture::only_default_excluded()).unwrap();
    let original = project.read_manifest();

    project.run_pin(&["--no-default-excludes"]).assert_success();

    let updated = project.read_manifest();
    assert_eq!(
        pinned_lines(&updated[original.len()..]),
        vec!["\tgithub.com/DataDog/orchestrion => github.com/DataDog/orchestrion v1.0.0"]
    );
}

#[test]
fn test_repeated_exclude_flags() {
    let project = PinProject::with_fixture(&ModFileFixture::basic()).unwrap();
    let original = project.read_manifest();

    project
        .run_pin(&["--exclude", "golang.org/x/sys", "--exclude", "golang.org/x/sys"])
        .assert_success();

    let updated = project.read_manifest();
    assert_eq!(
        pinned_lines(&updated[original.len()..]),
        vec!["\tgithub.com/pkg/errors => github.com/pkg/errors v0.9.1"]
    );
}

#[test]
fn test_excluding_everything_still_writes_backup() {
    let project = PinProject::with_fixture(&ModFileFixture::basic()).unwrap();
    let original = project.read_manifest();

    project
        .run_pin(&["--exclude", "golang.org/x/sys", "--exclude", "github.com/pkg/errors"])
        .assert_success();

    assert_eq!(project.read_manifest(), original);
    assert_eq!(project.read_backup(), original);
}

#[test]
fn test_cross_path_replaces_are_not_pinned() {
    let project = PinProject::with_fixture(&ModFileFixture::cross_path_replace()).unwrap();
    let original = project.read_manifest();

    project.run_pin(&[]).assert_success();

    let updated = project.read_manifest();
    assert_eq!(
        pinned_lines(&updated[original.len()..]),
        vec!["\texample.com/kept => example.com/kept v0.3.0"]
    );
}

#[test]
fn test_running_twice_appends_two_blocks() {
    let project = PinProject::with_fixture(&ModFileFixture::basic()).unwrap();
    let original = project.read_manifest();

    project.run_pin(&[]).assert_success();
    let after_first = project.read_manifest();

    project.run_pin(&[]).assert_success();
    let after_second = project.read_manifest();

    let block = &after_first[original.len()..];
    assert_eq!(after_second, format!("{after_first}{block}"));
    assert_eq!(after_second.matches("// prevent module upgrades").count(), 2);
    // The second backup holds the manifest as it was after the first run
    assert_eq!(project.read_backup(), after_first);
}

#[test]
fn test_existing_backup_is_replaced() {
    let project = PinProject::with_fixture(&ModFileFixture::basic()).unwrap();
    let original = project.read_manifest();
    std::fs::write(project.backup_path(), "stale backup").unwrap();

    project.run_pin(&[]).assert_success();

    assert_eq!(project.read_backup(), original);
}

#[test]
fn test_output_is_deterministic() {
    let first = PinProject::with_fixture(&ModFileFixture::basic()).unwrap();
    let second = PinProject::with_fixture(&ModFileFixture::basic()).unwrap();

    first.run_pin(&[]).assert_success();
    second.run_pin(&[]).assert_success();

    assert_eq!(first.read_manifest(), second.read_manifest());
}

#[test]
fn test_crlf_manifest() {
    let project = PinProject::new().unwrap();
    project
        .write_manifest("module example.com/crlf\r\n\r\nrequire example.com/x v1.2.3\r\n")
        .unwrap();

    project.run_pin(&[]).assert_success();

    assert!(project.read_manifest().ends_with("\texample.com/x => example.com/x v1.2.3\n)\n"));
}

#[cfg(unix)]
#[test]
fn test_backup_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let project = PinProject::with_fixture(&ModFileFixture::basic()).unwrap();
    std::fs::set_permissions(project.manifest_path(), std::fs::Permissions::from_mode(0o600))
        .unwrap();

    project.run_pin(&[]).assert_success();

    let mode = std::fs::metadata(project.backup_path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
