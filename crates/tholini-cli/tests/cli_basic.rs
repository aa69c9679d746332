//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_tholini"))
        .args(args)
        .env("THOLINI_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_routine_list_seeds_defaults() {
    let dir = TempDir::new().unwrap();
    let steps = run_json(&dir, &["routine", "list"]);
    assert_eq!(steps.as_array().unwrap().len(), 7);

    let night = run_json(&dir, &["routine", "list", "--time", "night"]);
    let names: Vec<_> = night
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Cleanse", "Serum", "Night Cream"]);
}

#[test]
fn test_toggle_updates_progress_and_history() {
    let dir = TempDir::new().unwrap();
    let event = run_json(&dir, &["routine", "toggle", "1"]);
    assert_eq!(event["type"], "StepToggled");
    assert_eq!(event["history"]["completedSteps"], 1);
    assert_eq!(event["history"]["totalSteps"], 7);

    let progress = run_json(&dir, &["routine", "progress"]);
    assert_eq!(progress["morning"], 25);
    assert_eq!(progress["night"], 0);

    let history = run_json(&dir, &["history", "show"]);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["percent"], 14);
}

#[test]
fn test_add_duplicate_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["routine", "add", "cleanse", "--time", "morning"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("cleanse already exists in your morning routine"));

    let steps = run_json(&dir, &["routine", "list"]);
    assert_eq!(steps.as_array().unwrap().len(), 7);
}

#[test]
fn test_add_empty_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["routine", "add", "  "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Please enter a step name"));
}

#[test]
fn test_add_and_remove_step() {
    let dir = TempDir::new().unwrap();
    let added = run_json(&dir, &["routine", "add", "Retinol", "--time", "night"]);
    let id = added["step"]["id"].as_str().unwrap().to_string();

    let removed = run_json(&dir, &["routine", "remove", &id]);
    assert_eq!(removed["type"], "StepDeleted");

    let (stdout, _, code) = run_cli(&dir, &["routine", "remove", &id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("no step with id"));
}

#[test]
fn test_toggle_unknown_id_is_noop() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["routine", "toggle", "missing"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("no step with id missing"));

    let history = run_json(&dir, &["history", "show"]);
    assert!(history.as_array().unwrap().is_empty());
}

#[test]
fn test_memory_flag_does_not_persist() {
    let dir = TempDir::new().unwrap();
    run_json(&dir, &["--memory", "routine", "toggle", "1"]);
    let progress = run_json(&dir, &["routine", "progress"]);
    assert_eq!(progress["morning"], 0);
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "routine.history_days"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "7");

    let (_, _, code) = run_cli(&dir, &["config", "set", "routine.history_days", "3"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&dir, &["config", "get", "routine.history_days"]);
    assert_eq!(stdout.trim(), "3");

    let (_, stderr, code) = run_cli(&dir, &["config", "set", "routine.bogus", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_chat_without_input_fails_fast() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["chat", "send"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("nothing to send"));
}
