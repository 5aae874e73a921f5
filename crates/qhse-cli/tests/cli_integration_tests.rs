use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn qhse() -> Command {
    Command::cargo_bin("qhse").unwrap()
}

#[test]
fn test_cli_version() {
    qhse()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("qhse"));
}

#[test]
fn test_cli_help_lists_modules() {
    qhse()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("incident"))
        .stdout(predicate::str::contains("risk"))
        .stdout(predicate::str::contains("training"))
        .stdout(predicate::str::contains("chemical"))
        .stdout(predicate::str::contains("ppe"))
        .stdout(predicate::str::contains("hygiene"))
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_no_command_prints_guidance() {
    let temp_dir = TempDir::new().unwrap();

    qhse()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Quick start"))
        .stdout(predicate::str::contains("qhse browse"));
}

#[test]
fn test_config_init_then_show() {
    let temp_dir = TempDir::new().unwrap();

    qhse()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["config", "init", "--api-url", "https://qhse.internal"])
        .assert()
        .success();

    assert!(temp_dir.path().join("config.toml").exists());

    qhse()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://qhse.internal"))
        .stdout(predicate::str::contains("verify_tls   = true"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "api_base_url = \"http://keep-me\"\n",
    )
    .unwrap();

    qhse()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["config", "init", "--api-url", "http://other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let content = fs::read_to_string(temp_dir.path().join("config.toml")).unwrap();
    assert!(content.contains("keep-me"), "existing config untouched");
}

#[test]
fn test_auth_login_status_logout_cycle() {
    let temp_dir = TempDir::new().unwrap();

    qhse()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("none"));

    qhse()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["auth", "login", "--token", "abc123"])
        .assert()
        .success();

    qhse()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stored"));

    qhse()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["auth", "logout"])
        .assert()
        .success();

    qhse()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("none"));
}

#[test]
fn test_browse_requires_session() {
    let temp_dir = TempDir::new().unwrap();

    qhse()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("browse")
        .assert()
        .failure()
        .stderr(predicate::str::contains("auth login"));
}

#[test]
fn test_delete_refuses_without_yes_when_piped() {
    let temp_dir = TempDir::new().unwrap();

    // stdin is not a terminal here, so the prompt cannot be shown.
    qhse()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["incident", "delete", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_create_rejects_invalid_json_draft() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("draft.json");
    fs::write(&draft, "{ not json").unwrap();

    qhse()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["incident", "create", "--file"])
        .arg(&draft)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn test_create_reports_validation_errors_before_any_request() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("draft.json");
    // Required fields missing: the command must fail locally.
    fs::write(&draft, "{\"description\": \"incomplet\"}").unwrap();

    qhse()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["incident", "create", "--file"])
        .arg(&draft)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Titre"))
        .stderr(predicate::str::contains("failed validation"));
}

#[test]
fn test_stats_rejects_unknown_periode() {
    qhse()
        .args(["stats", "--periode", "5y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
