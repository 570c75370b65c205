//! Integration tests for the `tl` CLI.
//!
//! Each test creates a temp data directory, runs `tl -C <dir>` as a
//! subprocess, and verifies stdout and/or the slot files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Path to the built `tl` binary.
fn tl_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tl"))
}

/// Seed `tasks.json` with three tasks, the middle one completed.
fn create_test_data(dir: &Path) {
    fs::write(
        dir.join("tasks.json"),
        r#"[
  {"id": "m1abc", "text": "Buy milk", "completed": false, "createdAt": "2025-05-01T12:00:00.000Z"},
  {"id": "m2def", "text": "Walk dog", "completed": true, "createdAt": "2025-05-02T12:00:00.000Z"},
  {"id": "x9zzz", "text": "Write report", "completed": false, "createdAt": "2025-05-03T12:00:00.000Z"}
]"#,
    )
    .unwrap();
}

/// Run `tl` against `dir`, returning (stdout, stderr, success).
fn run_tl(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(tl_bin())
        .arg("-C")
        .arg(dir)
        .args(args)
        .env_remove("TASKLIST_DIR")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tl");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `tl` expecting success, return stdout.
fn run_tl_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tl(dir, args);
    if !success {
        panic!(
            "tl {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `tl` expecting failure, return stderr.
fn run_tl_err(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tl(dir, args);
    if success {
        panic!("tl {:?} should have failed:\nstdout: {}", args, stdout);
    }
    stderr
}

fn stored_tasks(dir: &Path) -> Vec<serde_json::Value> {
    let text = fs::read_to_string(dir.join("tasks.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn stored_texts(dir: &Path) -> Vec<String> {
    stored_tasks(dir)
        .iter()
        .map(|t| t["text"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Read command tests
// ---------------------------------------------------------------------------

#[test]
fn test_list_empty_dir() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tl_ok(tmp.path(), &["list"]);
    assert!(out.contains("No tasks yet"));
    assert!(out.contains("0 total tasks"));
}

#[test]
fn test_list_default() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_tl_ok(tmp.path(), &["list"]);
    assert!(out.contains("  1. [ ] Buy milk  (m1abc, created "));
    assert!(out.contains("  2. [x] Walk dog"));
    assert!(out.contains("  3. [ ] Write report"));
    assert!(out.contains("[all] 3 total tasks \u{2022} 2 pending \u{2022} 1 completed"));
}

#[test]
fn test_list_with_filter_keeps_positions() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_tl_ok(tmp.path(), &["list", "--filter", "pending"]);
    assert!(out.contains("  1. [ ] Buy milk"));
    assert!(out.contains("  3. [ ] Write report"));
    assert!(!out.contains("Walk dog"));
    // Stats still cover everything
    assert!(out.contains("3 total tasks"));
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_tl_ok(tmp.path(), &["list", "--filter", "completed", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["filter"], "completed");
    let tasks = parsed["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], "m2def");
    assert_eq!(tasks[0]["position"], 2);
    assert_eq!(parsed["stats"]["total"], 3);
    assert_eq!(parsed["stats"]["completed"], 1);
}

#[test]
fn test_list_bad_filter() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_tl_err(tmp.path(), &["list", "--filter", "someday"]);
    assert!(err.contains("error: unknown filter 'someday'"));
}

#[test]
fn test_stats() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_tl_ok(tmp.path(), &["stats"]);
    assert_eq!(
        out.trim(),
        "3 total tasks \u{2022} 2 pending \u{2022} 1 completed"
    );

    let out = run_tl_ok(tmp.path(), &["stats", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["total"], 3);
    assert_eq!(parsed["pending"], 2);
    assert_eq!(parsed["completed"], 1);
}

// ---------------------------------------------------------------------------
// Write command tests
// ---------------------------------------------------------------------------

#[test]
fn test_add_then_reload() {
    let tmp = tempfile::TempDir::new().unwrap();

    let out = run_tl_ok(tmp.path(), &["add", "Buy", "milk"]);
    assert!(out.starts_with("Task added successfully!"));

    let tasks = stored_tasks(tmp.path());
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "Buy milk");
    assert_eq!(tasks[0]["completed"], false);
    assert!(tasks[0]["createdAt"].is_string());

    let out = run_tl_ok(tmp.path(), &["list"]);
    assert!(out.contains("Buy milk"));
}

#[test]
fn test_add_trims_and_appends() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    run_tl_ok(tmp.path(), &["add", "  Call mom  "]);
    assert_eq!(
        stored_texts(tmp.path()),
        vec!["Buy milk", "Walk dog", "Write report", "Call mom"]
    );
}

#[test]
fn test_add_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_tl_ok(tmp.path(), &["add", "Call mom", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["text"], "Call mom");
    assert_eq!(parsed["position"], 4);
    assert_eq!(parsed["completed"], false);
}

#[test]
fn test_add_blank_fails_without_writing() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_tl_err(tmp.path(), &["add", "   "]);
    assert!(err.contains("error: Please enter a task description"));
    assert!(!tmp.path().join("tasks.json").exists());
}

#[test]
fn test_add_too_long_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let long = "x".repeat(201);
    let err = run_tl_err(tmp.path(), &["add", &long]);
    assert!(err.contains("Task description must be less than 200 characters"));
    assert!(!tmp.path().join("tasks.json").exists());
}

#[test]
fn test_toggle_by_prefix() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_tl_ok(tmp.path(), &["toggle", "x9"]);
    assert_eq!(out.trim(), "Completed: Write report");
    assert_eq!(stored_tasks(tmp.path())[2]["completed"], true);

    let out = run_tl_ok(tmp.path(), &["toggle", "x9zzz"]);
    assert_eq!(out.trim(), "Reopened: Write report");
    let tasks = stored_tasks(tmp.path());
    assert_eq!(tasks[2]["completed"], false);
    assert_eq!(tasks[2]["id"], "x9zzz");
    assert!(
        tasks[2]["createdAt"]
            .as_str()
            .unwrap()
            .starts_with("2025-05-03T12:00:00")
    );
}

#[test]
fn test_ambiguous_prefix() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let err = run_tl_err(tmp.path(), &["toggle", "m"]);
    assert!(err.contains("matches more than one task"));
}

#[test]
fn test_unknown_id() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let err = run_tl_err(tmp.path(), &["delete", "nope"]);
    assert!(err.contains("task not found: nope"));
    assert_eq!(stored_tasks(tmp.path()).len(), 3);
}

#[test]
fn test_edit() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_tl_ok(tmp.path(), &["edit", "m1abc", "Buy oat milk"]);
    assert_eq!(out.trim(), "Task updated successfully!");
    let tasks = stored_tasks(tmp.path());
    assert_eq!(tasks[0]["text"], "Buy oat milk");
    assert_eq!(tasks[0]["id"], "m1abc");

    let out = run_tl_ok(tmp.path(), &["edit", "m1abc", "  Buy oat milk "]);
    assert_eq!(out.trim(), "No changes");
}

#[test]
fn test_delete() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_tl_ok(tmp.path(), &["delete", "m2"]);
    assert_eq!(out.trim(), "Deleted \"Walk dog\"");
    assert_eq!(stored_texts(tmp.path()), vec!["Buy milk", "Write report"]);
}

#[test]
fn test_mv() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_tl_ok(tmp.path(), &["mv", "1", "3"]);
    assert_eq!(out.trim(), "\"Buy milk\" moved to position 3");
    assert_eq!(
        stored_texts(tmp.path()),
        vec!["Walk dog", "Write report", "Buy milk"]
    );
}

#[test]
fn test_mv_out_of_range() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let err = run_tl_err(tmp.path(), &["mv", "1", "9"]);
    assert!(err.contains("invalid position"));
    let err = run_tl_err(tmp.path(), &["mv", "0", "1"]);
    assert!(err.contains("positions start at 1"));
    assert_eq!(
        stored_texts(tmp.path()),
        vec!["Buy milk", "Walk dog", "Write report"]
    );
}

#[test]
fn test_mv_refused_when_filtered() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    run_tl_ok(tmp.path(), &["filter", "pending"]);
    let err = run_tl_err(tmp.path(), &["mv", "1", "2"]);
    assert!(err.contains("Reordering is only available in \"All Tasks\" view"));
}

#[test]
fn test_clear() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_tl_ok(tmp.path(), &["clear"]);
    assert_eq!(out.trim(), "Cleared 1 completed task");
    assert_eq!(stored_texts(tmp.path()), vec!["Buy milk", "Write report"]);

    let out = run_tl_ok(tmp.path(), &["clear"]);
    assert_eq!(out.trim(), "No completed tasks to clear!");
}

#[test]
fn test_filter_persists() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    assert_eq!(run_tl_ok(tmp.path(), &["filter"]).trim(), "all");
    let out = run_tl_ok(tmp.path(), &["filter", "completed"]);
    assert_eq!(out.trim(), "Showing completed tasks");
    assert_eq!(
        fs::read_to_string(tmp.path().join("filter.json")).unwrap(),
        "\"completed\""
    );

    // list uses the saved filter
    let out = run_tl_ok(tmp.path(), &["list"]);
    assert!(out.contains("Walk dog"));
    assert!(!out.contains("Buy milk"));
}

// ---------------------------------------------------------------------------
// Resilience
// ---------------------------------------------------------------------------

#[test]
fn test_corrupt_tasks_fall_back_to_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.json"), "{ not json").unwrap();

    let (out, stderr, success) = run_tl(tmp.path(), &["list"]);
    assert!(success);
    assert!(out.contains("No tasks yet"));
    assert!(stderr.contains("tasks"));

    // The unreadable content was kept for recovery
    let log = fs::read_to_string(tmp.path().join(".recovery.log")).unwrap();
    assert!(log.contains("{ not json"));
}

#[test]
fn test_bad_filter_slot_falls_back_to_all() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    fs::write(tmp.path().join("filter.json"), "\"someday\"").unwrap();

    let out = run_tl_ok(tmp.path(), &["filter"]);
    assert_eq!(out.trim(), "all");
}

#[test]
fn test_data_dir_from_env() {
    let tmp = tempfile::TempDir::new().unwrap();
    let output = Command::new(tl_bin())
        .args(["add", "From env"])
        .env("TASKLIST_DIR", tmp.path())
        .output()
        .expect("failed to run tl");
    assert!(output.status.success());
    assert_eq!(stored_texts(tmp.path()), vec!["From env"]);
}
