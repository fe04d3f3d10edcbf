//! CLI interface tests
#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const RUNNER_FILE: &str = r#"
application: Acme Backend
program: acme
commands:
  - name: migrate
    description: Run database migrations
    run: 'echo "migrated $1"'
  - name: seed
    description: Load fixture data
    run: 'echo "seeded $*"'
  - name: broken
    description: Always fails
    run: 'exit 7'
groups:
  - name: setup
    description: Prepare a fresh database
    commands: [migrate, seed]
    priority: 10
"#;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("cmdrunner.yaml");
    fs::write(&path, content).unwrap();
    path
}

fn cmdrunner(config: &PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("cmdrunner").unwrap();
    cmd.env("CMDRUNNER_CONFIG", config).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands_and_groups() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, RUNNER_FILE);

    cmdrunner(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Backend - Management Commands"))
        .stdout(predicate::str::contains("--migrate         Run database migrations"))
        .stdout(predicate::str::contains("(expands to: migrate, seed)"))
        .stdout(predicate::str::contains("acme --help"));
}

#[test]
fn test_no_arguments_prints_usage_and_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, RUNNER_FILE);

    cmdrunner(&config)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Available Commands:"));
}

#[test]
fn test_unknown_command() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, RUNNER_FILE);

    cmdrunner(&config)
        .arg("--migrate")
        .arg("--nope")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown command: nope"))
        .stdout(predicate::str::contains("migrated").not());
}

#[test]
fn test_commands_run_in_order_with_their_arguments() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, RUNNER_FILE);

    cmdrunner(&config)
        .args(["--migrate", "5", "--seed", "a", "b"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)migrated 5\n.*seeded a b\n").unwrap());
}

#[test]
fn test_group_expands_to_members() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, RUNNER_FILE);

    cmdrunner(&config)
        .args(["--SETUP", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("migrated x"))
        .stdout(predicate::str::contains("seeded x"));
}

#[test]
fn test_failing_command_exit_code_is_propagated() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, RUNNER_FILE);

    cmdrunner(&config)
        .args(["--migrate", "--broken", "--seed"])
        .assert()
        .failure()
        .code(7)
        .stdout(predicate::str::contains("migrated"))
        .stdout(predicate::str::contains("seeded").not())
        .stderr(predicate::str::contains("Command Completed with Exit Code 7"));
}

#[test]
fn test_working_directory_is_relative_to_the_config_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("db")).unwrap();
    fs::write(temp_dir.path().join("db").join("schema.sql"), "").unwrap();
    let config = write_config(
        &temp_dir,
        r#"
commands:
  - name: list
    run: ls
    cwd: db
"#,
    );

    cmdrunner(&config)
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("schema.sql"));
}

#[test]
fn test_missing_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("nonexistent.yaml");

    cmdrunner(&config)
        .arg("--help")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_group_with_undeclared_member_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(
        &temp_dir,
        r#"
commands:
  - name: migrate
    run: 'true'
groups:
  - name: setup
    commands: [migrate, seed]
"#,
    );

    cmdrunner(&config)
        .arg("--setup")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("references unknown command 'seed'"));
}

#[test]
fn test_invalid_yaml_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, "commands: [\n");

    cmdrunner(&config)
        .arg("--help")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse YAML"));
}
