//! Integration tests for the `tick` CLI.
//!
//! Each test creates a temp directory with an empty `.tick/`, runs `tick` as
//! a subprocess, and verifies stdout and/or the slot file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Get the path to the built `tick` binary.
fn tick_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tick");
    path
}

/// Temp directory with an empty `.tick/` so discovery stops there.
fn setup() -> tempfile::TempDir {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".tick")).unwrap();
    tmp
}

fn slot_path(root: &Path) -> PathBuf {
    root.join(".tick/todos.json")
}

/// Run `tick` with the given args in the given directory, returning (stdout, stderr, success).
fn run_tick(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(tick_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run tick");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `tick` expecting success, return stdout.
fn run_tick_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tick(dir, args);
    if !success {
        panic!(
            "tick {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `tick` expecting failure, return stderr.
fn run_tick_err(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tick(dir, args);
    if success {
        panic!("tick {:?} unexpectedly succeeded:\nstdout: {}", args, stdout);
    }
    stderr
}

/// Add an item via `--json` and return its id.
fn add(dir: &Path, text: &str) -> u64 {
    let out = run_tick_ok(dir, &["add", text, "--json"]);
    let item: serde_json::Value = serde_json::from_str(&out).unwrap();
    item["id"].as_u64().unwrap()
}

fn read_slot(root: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(slot_path(root)).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn test_init_creates_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tick_ok(tmp.path(), &["init"]);
    assert!(out.contains("Initialized"));
    assert!(tmp.path().join(".tick/config.toml").exists());

    let err = run_tick_err(tmp.path(), &["init"]);
    assert!(err.contains("already exists"));
    run_tick_ok(tmp.path(), &["init", "--force"]);
}

#[test]
fn test_init_force_over_broken_config() {
    let tmp = setup();
    fs::write(
        tmp.path().join(".tick/config.toml"),
        "[items\nmax_text_len =",
    )
    .unwrap();

    let err = run_tick_err(tmp.path(), &["list"]);
    assert!(err.contains("could not parse config.toml"));

    run_tick_ok(tmp.path(), &["init", "--force"]);
    run_tick_ok(tmp.path(), &["list"]);
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn test_add_prints_item_and_persists() {
    let tmp = setup();
    let out = run_tick_ok(tmp.path(), &["add", "Buy", "milk"]);
    assert!(out.starts_with("[ ] "));
    assert!(out.trim_end().ends_with("Buy milk"));

    let slot = read_slot(tmp.path());
    let arr = slot.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["text"], "Buy milk");
    assert_eq!(arr[0]["completed"], false);
    assert!(arr[0]["createdAt"].is_string());
}

#[test]
fn test_add_trims_text() {
    let tmp = setup();
    add(tmp.path(), "  Walk dog  ");
    assert_eq!(read_slot(tmp.path())[0]["text"], "Walk dog");
}

#[test]
fn test_add_blank_fails_without_writing() {
    let tmp = setup();
    let err = run_tick_err(tmp.path(), &["add", "   "]);
    assert!(err.contains("error: text cannot be empty"));
    assert!(!slot_path(tmp.path()).exists());
}

#[test]
fn test_add_over_length_limit_fails() {
    let tmp = setup();
    fs::write(
        tmp.path().join(".tick/config.toml"),
        "[items]\nmax_text_len = 5\n",
    )
    .unwrap();
    let err = run_tick_err(tmp.path(), &["add", "too long for five"]);
    assert!(err.contains("too long"));
    run_tick_ok(tmp.path(), &["add", "short"]);
}

#[test]
fn test_newest_first_and_unique_ids() {
    let tmp = setup();
    let first = add(tmp.path(), "Buy milk");
    let second = add(tmp.path(), "Walk dog");
    assert!(second > first);

    let slot = read_slot(tmp.path());
    assert_eq!(slot[0]["text"], "Walk dog");
    assert_eq!(slot[1]["text"], "Buy milk");
}

#[test]
fn test_toggle_twice_restores() {
    let tmp = setup();
    let id = add(tmp.path(), "Buy milk");
    let id_str = id.to_string();

    let out = run_tick_ok(tmp.path(), &["toggle", &id_str]);
    assert!(out.starts_with("[x] "));
    assert_eq!(read_slot(tmp.path())[0]["completed"], true);

    let out = run_tick_ok(tmp.path(), &["toggle", &id_str]);
    assert!(out.starts_with("[ ] "));
    assert_eq!(read_slot(tmp.path())[0]["completed"], false);
}

#[test]
fn test_edit_replaces_text() {
    let tmp = setup();
    let id = add(tmp.path(), "Buy milk");
    let id_str = id.to_string();

    run_tick_ok(tmp.path(), &["edit", &id_str, "Buy", "oat", "milk"]);
    assert_eq!(read_slot(tmp.path())[0]["text"], "Buy oat milk");

    let err = run_tick_err(tmp.path(), &["edit", &id_str, " "]);
    assert!(err.contains("text cannot be empty"));
    assert_eq!(read_slot(tmp.path())[0]["text"], "Buy oat milk");
}

#[test]
fn test_rm_with_yes() {
    let tmp = setup();
    let keep = add(tmp.path(), "Buy milk");
    let gone = add(tmp.path(), "Walk dog");

    let out = run_tick_ok(tmp.path(), &["rm", &gone.to_string(), "--yes"]);
    assert!(out.starts_with("deleted"));

    let slot = read_slot(tmp.path());
    let arr = slot.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["id"].as_u64(), Some(keep));

    let err = run_tick_err(tmp.path(), &["rm", &gone.to_string(), "--yes"]);
    assert!(err.contains(&format!("item not found: {}", gone)));
}

#[test]
fn test_rm_prompt_answer_no_keeps_item() {
    let tmp = setup();
    let id = add(tmp.path(), "Buy milk");

    let mut child = Command::new(tick_bin())
        .args(["rm", &id.to_string()])
        .current_dir(tmp.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"n\n").unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("cancelled"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[y/N]"));
    assert_eq!(read_slot(tmp.path()).as_array().unwrap().len(), 1);
}

#[test]
fn test_toggle_unknown_id_fails() {
    let tmp = setup();
    add(tmp.path(), "Buy milk");
    let err = run_tick_err(tmp.path(), &["toggle", "42"]);
    assert!(err.contains("item not found: 42"));
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_list_empty() {
    let tmp = setup();
    let out = run_tick_ok(tmp.path(), &["list"]);
    assert!(out.contains("No todos yet"));
    assert!(out.contains("0 total, 0 active, 0 completed"));
}

#[test]
fn test_list_with_filters() {
    let tmp = setup();
    let milk = add(tmp.path(), "Buy milk");
    add(tmp.path(), "Walk dog");
    run_tick_ok(tmp.path(), &["toggle", &milk.to_string()]);

    let all = run_tick_ok(tmp.path(), &["list"]);
    assert!(all.find("Walk dog").unwrap() < all.find("Buy milk").unwrap());
    assert!(all.contains("2 total, 1 active, 1 completed"));

    let active = run_tick_ok(tmp.path(), &["list", "--filter", "active"]);
    assert!(active.contains("Walk dog"));
    assert!(!active.contains("Buy milk"));

    let done = run_tick_ok(tmp.path(), &["list", "-f", "completed"]);
    assert!(done.contains("[x]"));
    assert!(done.contains("Buy milk"));
    assert!(!done.contains("Walk dog"));
}

#[test]
fn test_list_bad_filter_fails() {
    let tmp = setup();
    let err = run_tick_err(tmp.path(), &["list", "--filter", "someday"]);
    assert!(err.starts_with("error:"));
}

#[test]
fn test_list_json() {
    let tmp = setup();
    let milk = add(tmp.path(), "Buy milk");
    add(tmp.path(), "Walk dog");
    run_tick_ok(tmp.path(), &["toggle", &milk.to_string()]);

    let out = run_tick_ok(tmp.path(), &["list", "--json", "--filter", "active"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["filter"], "active");
    let items = parsed["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["text"], "Walk dog");
    assert_eq!(parsed["counts"]["total"], 2);
    assert_eq!(parsed["counts"]["active"], 1);
    assert_eq!(parsed["counts"]["completed"], 1);
}

#[test]
fn test_show() {
    let tmp = setup();
    let id = add(tmp.path(), "Buy milk");
    let out = run_tick_ok(tmp.path(), &["show", &id.to_string()]);
    assert!(out.starts_with("Buy milk\n"));
    assert!(out.contains("status: Active"));
    assert!(out.contains("created: "));
    assert!(out.contains(&format!("id: {}", id)));
}

#[test]
fn test_stats_json() {
    let tmp = setup();
    add(tmp.path(), "Buy milk");
    let out = run_tick_ok(tmp.path(), &["stats", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["total"], 1);
    assert_eq!(parsed["active"], 1);
    assert_eq!(parsed["completed"], 0);
}

// ---------------------------------------------------------------------------
// Storage edge cases
// ---------------------------------------------------------------------------

#[test]
fn test_malformed_slot_reads_as_empty() {
    let tmp = setup();
    fs::write(slot_path(tmp.path()), "{not json").unwrap();

    let out = run_tick_ok(tmp.path(), &["list"]);
    assert!(out.contains("0 total"));

    // The next write replaces the bad payload
    add(tmp.path(), "Buy milk");
    assert_eq!(read_slot(tmp.path()).as_array().unwrap().len(), 1);

    // The bad payload was kept in the recovery log
    let out = run_tick_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("{not json"));
}

#[test]
fn test_hand_written_slot_is_read() {
    let tmp = setup();
    fs::write(
        slot_path(tmp.path()),
        r#"[{"id": 7, "text": "From disk", "completed": true, "createdAt": "2024-05-01T10:00:00.000Z"}]"#,
    )
    .unwrap();

    let out = run_tick_ok(tmp.path(), &["list"]);
    assert!(out.contains("[x] 7  From disk"));

    // New ids never collide with existing ones
    let id = add(tmp.path(), "New");
    assert!(id > 7);
}

#[test]
fn test_dir_flag_and_custom_slot() {
    let tmp = setup();
    fs::write(
        tmp.path().join(".tick/config.toml"),
        "[storage]\nslot = \"groceries\"\n",
    )
    .unwrap();
    let elsewhere = tempfile::TempDir::new().unwrap();
    let dir = tmp.path().to_str().unwrap();

    let out = Command::new(tick_bin())
        .args(["-C", dir, "add", "Buy milk"])
        .current_dir(elsewhere.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(tmp.path().join(".tick/groceries.json").exists());
    assert!(!slot_path(tmp.path()).exists());
}

#[test]
fn test_recovery_clear() {
    let tmp = setup();
    let out = run_tick_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("no recovery entries"));
    let out = run_tick_ok(tmp.path(), &["recovery", "--clear"]);
    assert!(out.contains("no recovery log"));
}
