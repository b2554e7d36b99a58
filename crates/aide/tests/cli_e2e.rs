#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use chrono::{Duration, Local};
use predicates::prelude::*;
use std::fs;
use std::process::{self, Stdio};
use tempfile::TempDir;

/// `aide` against `temp/data`, with home and config directories inside `temp`
/// so the user's own setup never leaks in.
fn aide_process(temp: &TempDir) -> process::Command {
    let mut cmd = process::Command::new(cargo_bin("aide"));
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("XDG_DATA_HOME", temp.path().join("share"))
        .env("NO_COLOR", "1")
        .env_remove("AIDE_DATA_DIR")
        .env_remove("AIDE_LOG_LEVEL")
        .arg("--data")
        .arg(temp.path().join("data"));
    cmd
}

fn aide_cmd(temp: &TempDir) -> Command {
    Command::from_std(aide_process(temp))
}

#[test]
fn test_add_and_show_contact() {
    let temp = TempDir::new().unwrap();

    aide_cmd(&temp)
        .args(["contacts", "add", "contact", "Ann Lee", "0501234567"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact 'Ann Lee' added"));

    aide_cmd(&temp)
        .args(["contact", "add", "email", "Ann Lee", "ann@example.com"])
        .assert()
        .success();

    aide_cmd(&temp)
        .args(["contacts", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ann Lee"))
        .stdout(predicate::str::contains("0501234567"))
        .stdout(predicate::str::contains("ann@example.com"));

    assert!(temp.path().join("data").join("contacts.json").exists());
}

#[test]
fn test_invalid_phone_is_rejected_and_nothing_saved() {
    let temp = TempDir::new().unwrap();

    aide_cmd(&temp)
        .args(["contacts", "add", "contact", "Ann Lee", "12345"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Invalid phone '12345'"));

    assert!(!temp.path().join("data").join("contacts.json").exists());
}

#[test]
fn test_duplicate_contact_is_an_error() {
    let temp = TempDir::new().unwrap();
    aide_cmd(&temp)
        .args(["contacts", "add", "contact", "Ann Lee"])
        .assert()
        .success();

    aide_cmd(&temp)
        .args(["contacts", "add", "contact", "Ann Lee"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Contact 'Ann Lee' already exists"));
}

#[test]
fn test_unknown_keyword_and_bad_arguments() {
    let temp = TempDir::new().unwrap();

    aide_cmd(&temp)
        .args(["contacts", "ad", "contact", "Ann Lee"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown command 'ad' for contacts"));

    aide_cmd(&temp)
        .args(["notes", "add", "tag", "Groceries"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("usage: add note <title>"));
}

#[test]
fn test_rename_survives_restart() {
    let temp = TempDir::new().unwrap();
    aide_cmd(&temp)
        .args(["contacts", "add", "contact", "Ann Lee", "0501234567"])
        .assert()
        .success();
    aide_cmd(&temp)
        .args(["contacts", "change", "name", "Ann Lee", "Ann", "Smith"])
        .assert()
        .success();

    aide_cmd(&temp)
        .args(["contacts", "show", "Ann Smith"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0501234567"));

    aide_cmd(&temp)
        .args(["contacts", "show", "Ann Lee"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Contact 'Ann Lee' not found"));
}

#[test]
fn test_upcoming_birthdays() {
    let temp = TempDir::new().unwrap();
    let soon = Local::now().date_naive() + Duration::days(3);
    let born = format!("{}.1992", soon.format("%d.%m"));

    aide_cmd(&temp)
        .args(["contacts", "add", "contact", "Ann Lee"])
        .assert()
        .success();
    aide_cmd(&temp)
        .args(["contacts", "add", "birthday", "Ann Lee", &born])
        .assert()
        .success();

    aide_cmd(&temp)
        .args(["contacts", "bd", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ann Lee"))
        .stdout(predicate::str::contains("in 3 days"));

    aide_cmd(&temp)
        .args(["contacts", "birthdays", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No birthdays in the next 1 day"));
}

#[test]
fn test_search_is_case_sensitive() {
    let temp = TempDir::new().unwrap();
    aide_cmd(&temp)
        .args(["contacts", "add", "contact", "Smith John"])
        .assert()
        .success();

    aide_cmd(&temp)
        .args(["contacts", "search", "smith"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No contacts match 'smith'"));

    aide_cmd(&temp)
        .args(["contacts", "find", "Smith"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 contact"));
}

#[test]
fn test_notes_workflow_with_json_output() {
    let temp = TempDir::new().unwrap();
    aide_cmd(&temp)
        .args(["notes", "add", "note", "Groceries", "milk, eggs", "home"])
        .assert()
        .success();
    aide_cmd(&temp)
        .args(["note", "add", "tag", "Groceries", "weekly"])
        .assert()
        .success();

    let output = aide_cmd(&temp)
        .args(["--json", "notes", "tagged", "weekly"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["notes"][0]["title"], "Groceries");
    assert_eq!(value["notes"][0]["body"], "milk, eggs");
    assert_eq!(value["notes"][0]["tags"][1], "weekly");
}

#[test]
fn test_empty_notebook_message() {
    let temp = TempDir::new().unwrap();
    aide_cmd(&temp)
        .args(["notes", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes saved yet"));
}

#[test]
fn test_corrupt_store_is_reported_and_preserved() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("contacts.json"), "not json at all").unwrap();

    aide_cmd(&temp)
        .args(["contacts", "show"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Could not read"))
        .stdout(predicate::str::contains("No contacts saved yet"));

    let preserved = fs::read_dir(&data)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with("contacts.json.corrupt-")
        })
        .count();
    assert_eq!(preserved, 1);
}

#[test]
fn test_commands_catalog() {
    let temp = TempDir::new().unwrap();
    aide_cmd(&temp)
        .args(["commands"])
        .assert()
        .success()
        .stdout(predicate::str::contains("birthdays (bd)"))
        .stdout(predicate::str::contains("aide notes tagged <tag>"));
}

#[test]
fn test_config_template_and_values() {
    let temp = TempDir::new().unwrap();
    aide_cmd(&temp)
        .args(["config", "template"])
        .assert()
        .success()
        .stdout(predicate::str::contains("contacts_file"));

    aide_cmd(&temp)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notes_file = notes.json"))
        .stdout(predicate::str::contains("log_dir = "));
}

#[test]
fn test_completions() {
    let temp = TempDir::new().unwrap();
    aide_cmd(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aide"));
}

#[test]
fn test_logs_are_written_to_data_dir() {
    let temp = TempDir::new().unwrap();
    aide_cmd(&temp)
        .args(["contacts", "add", "contact", "Ann Lee"])
        .assert()
        .success();
    assert!(temp.path().join("data").join("logs").is_dir());
}

#[test]
fn test_change_is_saved_when_reader_hangs_up() {
    let temp = TempDir::new().unwrap();
    let mut child = aide_process(&temp)
        .args(["contacts", "add", "contact", "Ann Lee", "0501234567"])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    drop(child.stdout.take());

    let status = child.wait().unwrap();
    assert!(status.success());
    assert!(temp.path().join("data").join("contacts.json").exists());

    aide_cmd(&temp)
        .args(["contacts", "show", "Ann Lee"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0501234567"));
}

#[test]
fn test_unreadable_contacts_file_leaves_notes_working() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(data.join("contacts.json")).unwrap();

    aide_cmd(&temp)
        .args(["notes", "add", "note", "Groceries", "milk"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Could not open"));
    assert!(data.join("notes.json").is_file());

    aide_cmd(&temp)
        .args(["contacts", "add", "contact", "Ann Lee"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("The contacts store is unavailable"));
    assert!(data.join("contacts.json").is_dir());
}

#[test]
fn test_io_errors_are_not_repeated() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(data.join("contacts.json")).unwrap();

    let output = aide_cmd(&temp)
        .args(["contacts", "add", "contact", "Ann Lee"])
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    let error_line = stderr
        .lines()
        .find(|line| line.starts_with("Error:"))
        .unwrap();
    assert_eq!(error_line.matches("os error").count(), 1);
}

#[test]
fn test_two_digit_birth_year_is_rejected() {
    let temp = TempDir::new().unwrap();
    aide_cmd(&temp)
        .args(["contacts", "add", "contact", "Ann Lee"])
        .assert()
        .success();
    aide_cmd(&temp)
        .args(["contacts", "add", "birthday", "Ann Lee", "15.03.90"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid birthday '15.03.90'"));
}
