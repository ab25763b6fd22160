//! End-to-end tests driving the `unitsplit` binary.

mod common;

use assert_cmd::Command;
use common::{driver_after_removal, driver_source, Project, GENERATED_FILES, LIBRARY_JSON};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn unitsplit(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("unitsplit").unwrap();
    cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_split_writes_every_artifact() {
    let project = Project::new();
    let output = unitsplit(project.root())
        .args(["split", "src/MB8ART.cpp", "--yes"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let stdout = stdout_of(&output);
    assert!(stdout.contains("MB8ART File Splitting Summary"));
    assert!(stdout.contains("Total methods found: 7"));
    assert!(stdout.contains("Created 6 new files"));
    assert!(stdout.contains("NEXT STEPS:"));

    for name in GENERATED_FILES {
        assert!(project.src(name).is_file(), "{name} missing");
    }
    assert_eq!(project.read("src/MB8ART.cpp"), driver_source());
    assert_eq!(project.read("src/MB8ART.cpp.backup"), driver_source());
    assert!(project.read("library.json").contains("\"+<MB8ARTSensor.cpp>\""));

    let plan = project.read("src/remove_moved_methods.toml");
    assert!(plan.contains("class = \"MB8ART\""));
    assert!(plan.contains("\"handleModbusResponse\""));
    assert!(!plan.contains("logWarnings"));
}

#[test]
fn test_declining_the_prompt_changes_nothing() {
    let project = Project::new();
    let output = unitsplit(project.root())
        .args(["split", "src/MB8ART.cpp"])
        .write_stdin("n\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Proceed with file splitting? (y/n): Aborted."));

    assert!(!project.src("MB8ART.cpp.backup").exists());
    assert!(!project.src("MB8ARTDevice.cpp").exists());
    assert!(!project.src("remove_moved_methods.toml").exists());
    assert_eq!(project.read("library.json"), LIBRARY_JSON);
}

#[test]
fn test_accepting_the_prompt_splits() {
    let project = Project::new();
    unitsplit(project.root())
        .args(["split", "src/MB8ART.cpp"])
        .write_stdin("Yes\n")
        .assert()
        .success();
    assert!(project.src("MB8ARTState.cpp").is_file());
}

#[test]
fn test_dry_run_writes_nothing() {
    let project = Project::new();
    let output = unitsplit(project.root())
        .args(["split", "src/MB8ART.cpp", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Dry run: no files written."));
    let entries = fs::read_dir(project.root().join("src")).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn test_split_then_remove() {
    let project = Project::new();
    unitsplit(project.root())
        .args(["split", "src/MB8ART.cpp", "-y", "--no-manifest"])
        .assert()
        .success();
    assert_eq!(project.read("library.json"), LIBRARY_JSON);

    unitsplit(project.root())
        .args(["remove", "src/remove_moved_methods.toml", "--dry-run"])
        .assert()
        .success();
    assert_eq!(project.read("src/MB8ART.cpp"), driver_source());

    let output = unitsplit(project.root())
        .args(["remove", "src/remove_moved_methods.toml"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Removed 6 methods from"));
    assert_eq!(project.read("src/MB8ART.cpp"), driver_after_removal());
}

#[test]
fn test_config_file_is_discovered() {
    let project = Project::new();
    fs::write(
        project.root().join(".unitsplit.toml"),
        "[source]\nnamespace = \"drivers\"\n\n[manifest]\nenabled = false\n",
    )
    .unwrap();

    unitsplit(project.root())
        .args(["split", "src/MB8ART.cpp", "-y"])
        .assert()
        .success();
    assert!(project
        .read("src/MB8ARTConfig.cpp")
        .contains("#include <RetryPolicy.h>\n\nusing namespace drivers;\n"));
    assert_eq!(project.read("library.json"), LIBRARY_JSON);
}

#[test]
fn test_missing_source_fails() {
    let dir = TempDir::new().unwrap();
    let output = unitsplit(dir.path())
        .args(["split", "MB8ART.cpp", "-y"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read source file"));
}

#[test]
fn test_failed_write_stops_before_manifest_and_plan() {
    let project = Project::new();
    // A directory squatting on the Communication file name makes its write fail.
    fs::create_dir(project.src("MB8ARTModbus.cpp")).unwrap();

    let output = unitsplit(project.root())
        .args(["split", "src/MB8ART.cpp", "-y"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to write split files"));

    // Files written before the failure are not rolled back.
    assert_eq!(project.read("src/MB8ART.cpp.backup"), driver_source());
    assert!(project.src("MB8ARTDevice.cpp").is_file());
    assert!(!project.src("MB8ARTState.cpp").exists());
    assert!(!project.src("remove_moved_methods.toml").exists());
    assert_eq!(project.read("library.json"), LIBRARY_JSON);
    assert_eq!(project.read("src/MB8ART.cpp"), driver_source());
}

#[test]
fn test_broken_explicit_config_fails() {
    let project = Project::new();
    fs::write(project.root().join("custom.toml"), "[source\n").unwrap();
    unitsplit(project.root())
        .args(["split", "src/MB8ART.cpp", "-y", "--config", "custom.toml"])
        .assert()
        .failure();
    assert!(!project.src("MB8ARTDevice.cpp").exists());
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    unitsplit(dir.path()).arg("init").assert().success();
    assert!(dir.path().join(".unitsplit.toml").is_file());

    unitsplit(dir.path()).arg("init").assert().failure();
    unitsplit(dir.path()).args(["init", "--force"]).assert().success();
}
