//! CLI integration tests for Specify
//!
//! These tests exercise the offline surface of the tool: argument
//! validation, local-template initialization, status reporting and the
//! informational commands. Network-backed flows (release download) are
//! covered by unit tests against the pure selection/extraction logic.

use std::fs;
use std::path::Path;

use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command instance for the specify binary
fn specify_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("specify"))
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Create a development checkout the --local mode can copy from
fn dev_checkout() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "templates/commands/plan.md",
        "# Create a plan\n\nRun `{SCRIPT}` with $ARGUMENTS.\n",
    );
    write(
        dir.path(),
        "templates/commands/specify.md",
        "# Write a spec\n\nRun `{SCRIPT}` with $ARGUMENTS.\n",
    );
    write(dir.path(), "memory/constitution.md", "# Constitution\n");
    write(dir.path(), "scripts/bash/plan.sh", "#!/bin/sh\necho plan\n");
    write(dir.path(), ".vscode/settings.json", "{}\n");
    dir
}

/// Initialize a project with local templates and no git
fn init_local_project(dev: &TempDir, workdir: &TempDir, name: &str) {
    specify_cmd()
        .current_dir(workdir.path())
        .env("SPECIFY_DEV_DIR", dev.path())
        .args(["init", name, "--local", "--ai", "claude", "--no-git"])
        .assert()
        .success();
}

// =============================================================================
// Init argument validation
// =============================================================================

#[test]
fn test_init_rejects_name_with_here() {
    let dir = TempDir::new().unwrap();

    specify_cmd()
        .current_dir(dir.path())
        .args(["init", "proj", "--here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("both a project name and --here"));
}

#[test]
fn test_init_requires_name_or_here() {
    let dir = TempDir::new().unwrap();

    specify_cmd()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Must specify"));
}

#[test]
fn test_init_rejects_existing_directory() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("proj")).unwrap();

    specify_cmd()
        .current_dir(dir.path())
        .args(["init", "proj"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // Nothing was created or removed.
    assert!(dir.path().join("proj").is_dir());
}

#[test]
fn test_init_here_nonempty_requires_force() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("existing.txt"), "content").unwrap();

    specify_cmd()
        .current_dir(dir.path())
        .args(["init", "--here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    assert_eq!(
        fs::read_to_string(dir.path().join("existing.txt")).unwrap(),
        "content"
    );
}

#[test]
fn test_init_dot_is_shorthand_for_here() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("existing.txt"), "content").unwrap();

    // '.' routes through the --here validation.
    specify_cmd()
        .current_dir(dir.path())
        .args(["init", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

// =============================================================================
// Local-template initialization
// =============================================================================

#[test]
fn test_init_local_creates_scaffold() {
    let dev = dev_checkout();
    let dir = TempDir::new().unwrap();

    specify_cmd()
        .current_dir(dir.path())
        .env("SPECIFY_DEV_DIR", dev.path())
        .args(["init", "proj", "--local", "--ai", "claude", "--no-git"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project ready."));

    let proj = dir.path().join("proj");
    assert!(proj.join(".specify/templates/commands/plan.md").is_file());
    assert!(proj.join(".specify/memory/constitution.md").is_file());
    assert!(proj.join(".specify/scripts/bash/plan.sh").is_file());
    assert!(proj.join(".vscode/settings.json").is_file());
}

#[test]
fn test_init_local_generates_assistant_commands() {
    let dev = dev_checkout();
    let dir = TempDir::new().unwrap();
    init_local_project(&dev, &dir, "proj");

    let proj = dir.path().join("proj");
    let plan = fs::read_to_string(proj.join(".claude/commands/plan.md")).unwrap();
    assert!(plan.contains(".specify/scripts/bash/plan.sh"));
    assert!(!plan.contains("{SCRIPT}"));
    assert!(proj.join(".claude/commands/specify.md").is_file());
}

#[test]
fn test_init_local_records_script_selection() {
    let dev = dev_checkout();
    let dir = TempDir::new().unwrap();

    specify_cmd()
        .current_dir(dir.path())
        .env("SPECIFY_DEV_DIR", dev.path())
        .args([
            "init", "proj", "--local", "--ai", "claude", "--no-git", "--script", "ps",
        ])
        .assert()
        .success();

    let config: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(
            dir.path().join("proj/.specify/config/models.json"),
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(config["scripts"]["preferred"], "ps");
    assert_eq!(config["scripts"]["folder"], "powershell");
    assert_eq!(config["scripts"]["extension"], "ps1");
}

#[test]
fn test_init_local_missing_dev_dir_fails_cleanly() {
    let empty = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    specify_cmd()
        .current_dir(dir.path())
        .env("SPECIFY_DEV_DIR", empty.path())
        .args(["init", "proj", "--local", "--ai", "claude", "--no-git"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Local templates directory not found"));

    assert!(!dir.path().join("proj").exists());
}

#[test]
fn test_init_local_into_current_directory_with_force() {
    let dev = dev_checkout();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("existing.txt"), "keep me").unwrap();

    specify_cmd()
        .current_dir(dir.path())
        .env("SPECIFY_DEV_DIR", dev.path())
        .args([
            "init", "--here", "--force", "--local", "--ai", "claude", "--no-git",
        ])
        .assert()
        .success();

    // Pre-existing content survives a merge into the current directory.
    assert_eq!(
        fs::read_to_string(dir.path().join("existing.txt")).unwrap(),
        "keep me"
    );
    assert!(dir.path().join(".specify/templates/commands/plan.md").is_file());
}

// =============================================================================
// Status
// =============================================================================

#[test]
fn test_status_outside_project() {
    let dir = TempDir::new().unwrap();

    specify_cmd()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not a Specify project"));
}

#[test]
fn test_status_reports_next_actions() {
    let dev = dev_checkout();
    let dir = TempDir::new().unwrap();
    init_local_project(&dev, &dir, "proj");
    let proj = dir.path().join("proj");

    write(&proj, "specs/001-auth/spec.md", "# Spec");
    write(&proj, "specs/001-auth/plan.md", "# Plan");
    write(&proj, "specs/002-sync/spec.md", "# Spec");
    fs::create_dir_all(proj.join("specs/003-empty")).unwrap();

    specify_cmd()
        .current_dir(&proj)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("001-auth"))
        .stdout(predicate::str::contains("/tasks"))
        .stdout(predicate::str::contains("/plan"))
        .stdout(predicate::str::contains("/specify"));
}

#[test]
fn test_status_json_output() {
    let dev = dev_checkout();
    let dir = TempDir::new().unwrap();
    init_local_project(&dev, &dir, "proj");
    let proj = dir.path().join("proj");

    write(&proj, "specs/001-auth/spec.md", "# Spec");

    let output = specify_cmd()
        .current_dir(&proj)
        .args(["status", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(payload["is_project"], true);
    assert_eq!(payload["has_constitution"], true);
    assert_eq!(payload["specs_present"], 1);
    assert_eq!(payload["features"][0]["next_action"], "plan");
    assert_eq!(payload["script_flavor"], "sh");
}

#[test]
fn test_status_agent_output() {
    let dev = dev_checkout();
    let dir = TempDir::new().unwrap();
    init_local_project(&dev, &dir, "proj");
    let proj = dir.path().join("proj");

    write(&proj, "specs/001-auth/spec.md", "# Spec");

    specify_cmd()
        .current_dir(&proj)
        .args(["status", "--format", "agent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project: specify"))
        .stdout(predicate::str::contains(
            "feature: 001-auth spec=x plan=- tasks=- next=/plan",
        ));
}

#[test]
fn test_status_suggests_constitution_first() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".specify")).unwrap();

    specify_cmd()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("/constitution"));
}

// =============================================================================
// Informational commands
// =============================================================================

#[test]
fn test_bare_invocation_shows_usage_hint() {
    specify_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("specify --help"));
}

#[test]
fn test_version_reports_crate_version() {
    specify_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Specify CLI version:"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_check_lists_tools() {
    specify_cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Git version control"))
        .stdout(predicate::str::contains("ready to use"));
}

#[test]
fn test_check_json_output() {
    let output = specify_cmd()
        .args(["check", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(payload["git"].is_boolean());
}
