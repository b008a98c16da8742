use assert_cmd::Command;
use predicates::prelude::*;

fn ocp_s2i() -> Command {
    Command::cargo_bin("ocp-s2i").unwrap()
}

#[test]
fn test_help_lists_subcommands() {
    ocp_s2i()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("tags"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_create_requires_image_stream() {
    ocp_s2i()
        .arg("create")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--image-stream"));
}

#[test]
fn test_json_requires_dry_run() {
    ocp_s2i()
        .args(["create", "-i", "nodejs", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--dry-run"));
}

#[test]
fn test_incomplete_form_fails_before_connecting() {
    ocp_s2i()
        .args(["create", "-i", "nodejs", "--name", "app", "--no-input"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Please complete all fields."))
        .stderr(predicate::str::contains("Connecting").not());
}

#[test]
fn test_bad_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s2i.toml");
    std::fs::write(&path, "image_namespace = [").unwrap();
    ocp_s2i()
        .args(["--config", path.to_str().unwrap(), "tags", "-i", "nodejs"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_sample_conflicts_with_repository() {
    ocp_s2i()
        .args([
            "create",
            "-i",
            "nodejs",
            "--sample",
            "--repository",
            "https://github.com/example/app.git",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_help_documents_exit_status() {
    ocp_s2i()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 when the form is incomplete"));
}
