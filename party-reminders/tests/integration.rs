//! Integration tests for party-reminders

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_test_env() -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[latency]\nenabled = false\n").unwrap();

    let path = config_path.to_string_lossy().to_string();
    (temp_dir, path)
}

fn party_reminders(config_path: &str) -> Command {
    let mut cmd = Command::cargo_bin("party-reminders").unwrap();
    cmd.env("PARTYPLAN_CONFIG", config_path)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_list_reminders() {
    let (_temp_dir, config_path) = setup_test_env();

    party_reminders(&config_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sarah's 30th Birthday"))
        .stdout(predicate::str::contains("3 days left"))
        .stdout(predicate::str::contains("Mom's Birthday"));
}

#[test]
fn test_list_by_type() {
    let (_temp_dir, config_path) = setup_test_env();

    let output = party_reminders(&config_path)
        .args(["list", "--type", "birthday", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let reminders: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<u64> = reminders.iter().map(|r| r["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(reminders.iter().all(|r| r["type"] == "birthday"));
}

#[test]
fn test_list_unknown_type() {
    let (_temp_dir, config_path) = setup_test_env();

    party_reminders(&config_path)
        .args(["list", "--type", "holiday"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid reminder type: 'holiday'"));
}

#[test]
fn test_show_with_planned_event() {
    let (_temp_dir, config_path) = setup_test_env();

    party_reminders(&config_path)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sarah's 30th Birthday (#1)"))
        .stdout(predicate::str::contains("Sarah Johnson (Friend)"))
        .stdout(predicate::str::contains("1, 7, 30 days before"))
        .stdout(predicate::str::contains("Spa gift card, Wine subscription, Jewelry"))
        .stdout(predicate::str::contains("Sarah's Surprise Birthday Party (#3)"));
}

#[test]
fn test_show_without_planned_event_json() {
    let (_temp_dir, config_path) = setup_test_env();

    let output = party_reminders(&config_path)
        .args(["show", "3", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let details: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(details["reminder"]["title"], "Mom's Birthday");
    assert!(details["plannedEvent"].is_null());
}

#[test]
fn test_show_missing() {
    let (_temp_dir, config_path) = setup_test_env();

    party_reminders(&config_path)
        .args(["show", "99"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Reminder not found: 99"));
}

#[test]
fn test_create_reminder() {
    let (_temp_dir, config_path) = setup_test_env();

    let output = party_reminders(&config_path)
        .args([
            "create",
            "--title",
            "Dad's Birthday",
            "--date",
            "10d",
            "--recipient",
            "Robert",
            "--relationship",
            "Father",
            "--gifts",
            "Book, , Watch",
            "--notify",
            "1, 7",
            "--event",
            "6",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let reminder: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reminder["id"], 4);
    assert_eq!(reminder["type"], "birthday");
    assert_eq!(reminder["giftIdeas"], serde_json::json!(["Book", "Watch"]));
    assert_eq!(reminder["notifyBefore"], serde_json::json!([1, 7]));
    assert_eq!(reminder["plannedEventId"], 6);
}

#[test]
fn test_create_birthday_requires_recipient() {
    let (_temp_dir, config_path) = setup_test_env();

    party_reminders(&config_path)
        .args(["create", "--title", "Someone's Birthday", "--date", "2d"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "recipientName: Recipient name is required",
        ));
}

#[test]
fn test_create_meeting_without_recipient() {
    let (_temp_dir, config_path) = setup_test_env();

    party_reminders(&config_path)
        .args(["create", "--title", "Venue walkthrough", "--type", "meeting", "--date", "1d"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created reminder 4: Venue walkthrough"));
}

#[test]
fn test_create_rejects_bad_notify() {
    let (_temp_dir, config_path) = setup_test_env();

    party_reminders(&config_path)
        .args(["create", "--title", "x", "--type", "other", "--notify", "1,soon"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid notification offset 'soon'"));
}

#[test]
fn test_create_in_past_is_rejected() {
    let (_temp_dir, config_path) = setup_test_env();

    party_reminders(&config_path)
        .args(["create", "--title", "Old", "--type", "other", "--date", "2001-01-01"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Date cannot be in the past"));
}

#[test]
fn test_update_keeps_other_fields() {
    let (_temp_dir, config_path) = setup_test_env();

    let output = party_reminders(&config_path)
        .args(["update", "2", "--description", "Silver wedding", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let reminder: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reminder["description"], "Silver wedding");
    assert_eq!(reminder["title"], "Rodriguez 25th Anniversary");
    assert_eq!(reminder["recipientName"], "Maria & Carlos Rodriguez");
    assert_eq!(
        reminder["giftIdeas"],
        serde_json::json!(["Photo album", "Weekend getaway", "Engraved gift"])
    );
    assert_eq!(reminder["plannedEventId"], 5);
}

#[test]
fn test_update_clearing_recipient_of_birthday_is_rejected() {
    let (_temp_dir, config_path) = setup_test_env();

    party_reminders(&config_path)
        .args(["update", "3", "--recipient", ""])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Recipient name is required"));
}

#[test]
fn test_update_missing() {
    let (_temp_dir, config_path) = setup_test_env();

    party_reminders(&config_path)
        .args(["update", "42", "--title", "Ghost"])
        .assert()
        .code(2);
}

#[test]
fn test_delete() {
    let (_temp_dir, config_path) = setup_test_env();

    party_reminders(&config_path)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted reminder 1"));

    party_reminders(&config_path)
        .args(["delete", "42"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Reminder not found: 42"));
}
