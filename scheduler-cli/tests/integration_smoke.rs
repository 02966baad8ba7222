//! Smoke tests to verify command module wiring

use assert_cmd::Command;
use predicates::prelude::*;

const DB_VARS: [&str; 3] = [
    "MYSQL_SCHEDULER_DB_PORT",
    "MYSQL_SCHEDULER_DB_USERNAME",
    "MYSQL_SCHEDULER_DB_PASSWORD",
];

fn scheduler(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("scheduler").unwrap();
    cmd.env("HOME", home)
        .env_remove("SCHEDULER_TIMEZONE")
        .env_remove("RUST_LOG")
        .current_dir(home);
    for var in DB_VARS {
        cmd.env_remove(var);
    }
    cmd
}

// === Appointment Command Tests ===

#[test]
fn test_appointments_add_help() {
    let home = tempfile::tempdir().unwrap();
    scheduler(home.path())
        .args(["appointments", "add", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--ignore-hours"))
        .stdout(predicate::str::contains("--allow-overlap"))
        .stdout(predicate::str::contains("--start-time"));
}

#[test]
fn test_appointments_list_help() {
    let home = tempfile::tempdir().unwrap();
    scheduler(home.path())
        .args(["appointments", "list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("week"))
        .stdout(predicate::str::contains("month"));
}

#[test]
fn test_appointments_list_rejects_unknown_span() {
    let home = tempfile::tempdir().unwrap();
    scheduler(home.path())
        .args(["appointments", "list", "--span", "year"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// === Customer Command Tests ===

#[test]
fn test_customers_delete_help() {
    let home = tempfile::tempdir().unwrap();
    scheduler(home.path())
        .args(["customers", "delete", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skip the confirmation prompt"));
}

#[test]
fn test_customers_list_without_credentials() {
    let home = tempfile::tempdir().unwrap();
    scheduler(home.path())
        .args(["customers", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("MYSQL_SCHEDULER_DB_PORT"));
}

// === Report Command Tests ===

#[test]
fn test_reports_help() {
    let home = tempfile::tempdir().unwrap();
    scheduler(home.path())
        .args(["reports", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("month-type"))
        .stdout(predicate::str::contains("contacts"))
        .stdout(predicate::str::contains("customers"));
}

// === Db Command Tests ===

#[test]
fn test_db_init_help() {
    let home = tempfile::tempdir().unwrap();
    scheduler(home.path())
        .args(["db", "init", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--seed"));
}

// === Config Command Tests ===

#[test]
fn test_config_path_uses_home() {
    let home = tempfile::tempdir().unwrap();
    scheduler(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".scheduler/config.toml"));
}

#[test]
fn test_config_init_then_show() {
    let home = tempfile::tempdir().unwrap();
    scheduler(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));

    assert!(home.path().join(".scheduler/config.toml").exists());

    scheduler(home.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    scheduler(home.path())
        .env("TZ", "America/Denver")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("upcoming_minutes = 15"))
        .stdout(predicate::str::contains("America/Denver"));
}

#[test]
fn test_config_init_force_repairs_broken_file() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join(".scheduler");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[display").unwrap();

    scheduler(home.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid TOML"));

    scheduler(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".scheduler/config.toml"));

    scheduler(home.path())
        .args(["config", "init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));

    scheduler(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("upcoming_minutes = 15"));
}

#[test]
fn test_config_show_rejects_bad_zone() {
    let home = tempfile::tempdir().unwrap();
    scheduler(home.path())
        .env("SCHEDULER_TIMEZONE", "Mars/Olympus")
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SCHEDULER_TIMEZONE"));
}
