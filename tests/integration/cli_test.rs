//! Smoke tests for the docseed binary; all run in --dry-run mode or fail before connecting

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn docseed() -> Command {
    let mut cmd = Command::cargo_bin("docseed").unwrap();
    cmd.env_remove("MONGO_URI")
        .env_remove("MONGO_DATABASE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_dry_run_reports_summary() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("golazodb.teams.json"),
        r#"[{"_id": {"$oid": "64b7f0c2a1b2c3d4e5f60001"}, "founded": {"$date": "1923-06-18"}}]"#,
    )
    .unwrap();

    docseed()
        .current_dir(dir.path())
        .args([dir.path().to_str().unwrap(), "--dry-run", "--stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("teams: 1/1 inserted"))
        .stdout(predicate::str::contains("[dry run] 1 collection(s) seeded"))
        .stdout(predicate::str::contains("Seeding Statistics:"));
}

#[test]
fn test_document_failures_do_not_change_exit_code() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("golazodb.matches.json"),
        r#"[{"at": {"$date": "never"}}, {"at": {"$date": 0}}]"#,
    )
    .unwrap();

    docseed()
        .current_dir(dir.path())
        .args([dir.path().to_str().unwrap(), "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/2 documents inserted"))
        .stderr(predicate::str::contains("never"));
}

#[test]
fn test_stop_on_error_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("golazodb.bad.json"), "[{").unwrap();

    docseed()
        .current_dir(dir.path())
        .args([dir.path().to_str().unwrap(), "--dry-run", "--stop-on-error", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Seeding aborted at 'bad'"));
}

#[test]
fn test_missing_uri_fails_before_connecting() {
    let dir = tempdir().unwrap();

    docseed()
        .current_dir(dir.path())
        .arg(dir.path().to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("MONGO_URI is not set"));
}

#[test]
fn test_missing_env_file_fails() {
    let dir = tempdir().unwrap();

    docseed()
        .current_dir(dir.path())
        .args([
            dir.path().to_str().unwrap(),
            "--dry-run",
            "--env-file",
            dir.path().join("nope.env").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot load environment file"));
}

#[test]
fn test_help_mentions_prefix() {
    docseed()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--prefix"));
}
