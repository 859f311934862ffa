//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Every
//! test gets its own data directory through `CAREROTA_DATA_DIR`, so
//! config and rota files never leak between tests or into the real
//! user directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against an isolated data directory and return
/// (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "-p", "carerota-cli", "--"])
        .args(args)
        .env("CAREROTA_DATA_DIR", data_dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// The date key of the first rendered day, i.e. today.
fn today_key(data_dir: &Path) -> String {
    let (stdout, _, code) = run_cli(data_dir, &["rota", "show", "--days", "1", "--json"]);
    assert_eq!(code, 0, "rota show failed");
    let days: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    days[0]["date"].as_str().expect("date key").to_string()
}

#[test]
fn test_rota_show_renders_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["rota", "show", "--days", "3"]);
    assert_eq!(code, 0, "rota show failed");
    assert!(stdout.contains("(today)"));
    assert!(stdout.contains("8am-5pm"));
    assert!(stdout.contains("5pm-9pm"));
}

#[test]
fn test_rota_show_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["rota", "show", "--days", "2", "--json"]);
    assert_eq!(code, 0, "rota show JSON failed");

    let days: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let days = days.as_array().expect("array of days");
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["is_today"], true);
    assert_eq!(days[1]["is_today"], false);
    assert_eq!(days[0]["shifts"].as_array().unwrap().len(), 2);
    assert_eq!(days[0]["shifts"][0]["start"], "08:00");
    assert_eq!(days[0]["shifts"][1]["start"], "17:00");
}

#[test]
fn test_rota_set_time_morning_cascades() {
    let dir = tempfile::tempdir().unwrap();
    let today = today_key(dir.path());

    let (stdout, _, code) = run_cli(
        dir.path(),
        &["rota", "set-time", &today, "morning", "09:00", "18:00"],
    );
    assert_eq!(code, 0, "set-time failed");
    assert!(stdout.contains("night shift now starts at 6pm"));

    let (stdout, _, code) = run_cli(dir.path(), &["rota", "show", "--days", "1", "--json"]);
    assert_eq!(code, 0);
    let days: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(days[0]["shifts"][0]["start"], "09:00");
    assert_eq!(days[0]["shifts"][0]["end"], "18:00");
    assert_eq!(days[0]["shifts"][1]["start"], "18:00");
    assert_eq!(days[0]["shifts"][1]["end"], "21:00");
}

#[test]
fn test_rota_late_morning_suppresses_evening() {
    let dir = tempfile::tempdir().unwrap();
    let today = today_key(dir.path());

    let (_, _, code) = run_cli(
        dir.path(),
        &["rota", "set-time", &today, "morning", "08:00", "21:00"],
    );
    assert_eq!(code, 0, "set-time failed");

    let (stdout, _, code) = run_cli(dir.path(), &["rota", "show", "--days", "1", "--json"]);
    assert_eq!(code, 0);
    let days: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let shifts = days[0]["shifts"].as_array().unwrap();
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0]["icon"], "📅");
}

#[test]
fn test_rota_assign_and_note_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let today = today_key(dir.path());

    let (_, _, code) = run_cli(dir.path(), &["rota", "assign", &today, "morning", " Alice "]);
    assert_eq!(code, 0, "assign failed");
    let (_, _, code) = run_cli(dir.path(), &["rota", "note", &today, "morning", "confirmed"]);
    assert_eq!(code, 0, "note failed");

    let (stdout, _, code) = run_cli(dir.path(), &["rota", "show", "--days", "1", "--json"]);
    assert_eq!(code, 0);
    let days: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(days[0]["shifts"][0]["name"], "Alice");
    assert_eq!(days[0]["shifts"][0]["comment"], "confirmed");
}

#[test]
fn test_rota_clear_name() {
    let dir = tempfile::tempdir().unwrap();
    let today = today_key(dir.path());

    let (_, _, code) = run_cli(dir.path(), &["rota", "assign", &today, "evening", "Bob"]);
    assert_eq!(code, 0, "assign failed");
    let (_, _, code) = run_cli(dir.path(), &["rota", "clear", &today, "evening", "name"]);
    assert_eq!(code, 0, "clear failed");

    let (stdout, _, code) = run_cli(dir.path(), &["rota", "show", "--days", "1", "--json"]);
    assert_eq!(code, 0);
    let days: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(days[0]["shifts"][1]["name"], "");
}

#[test]
fn test_rota_set_time_rejects_bad_time() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        dir.path(),
        &["rota", "set-time", "2030-01-15", "morning", "9am", "18:00"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_rota_rejects_unknown_shift() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["rota", "assign", "2030-01-15", "midday", "Al"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_rota_rejects_bad_date() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["rota", "note", "15/01/2030", "morning", "x"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_time_adjust() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["time", "adjust", "08:00", "1"]);
    assert_eq!(code, 0, "time adjust failed");
    assert_eq!(stdout.trim(), "08:30");

    let (stdout, _, code) = run_cli(dir.path(), &["time", "adjust", "23:30", "1"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "00:00");

    let (stdout, _, code) = run_cli(dir.path(), &["time", "adjust", "08:00", "-1"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "07:30");
}

#[test]
fn test_time_adjust_custom_step() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["time", "adjust", "09:00", "2", "--step-minutes", "15"],
    );
    assert_eq!(code, 0, "time adjust failed");
    assert_eq!(stdout.trim(), "09:30");
}

#[test]
fn test_time_display() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["time", "display", "17:30"]);
    assert_eq!(code, 0, "time display failed");
    assert_eq!(stdout.trim(), "5:30pm");
}

#[test]
fn test_color_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let (first, _, code) = run_cli(dir.path(), &["color", "Alice"]);
    assert_eq!(code, 0, "color failed");
    assert_eq!(first.trim(), "bg-amber-200 text-amber-800");

    let (second, _, code) = run_cli(dir.path(), &["color", "Alice"]);
    assert_eq!(code, 0);
    assert_eq!(first, second);
}

#[test]
fn test_color_json() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["color", "Alice", "--json"]);
    assert_eq!(code, 0, "color JSON failed");
    let pair: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(pair["bg"], "bg-amber-200");
    assert_eq!(pair["text"], "text-amber-800");
}

#[test]
fn test_config_get_set_round_trip() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "view.initial_days"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "21");

    let (stdout, _, code) = run_cli(dir.path(), &["config", "set", "view.initial_days", "35"]);
    assert_eq!(code, 0, "config set failed");
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "view.initial_days"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "35");
}

#[test]
fn test_config_get_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let config: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(config["store"]["path"], "shifts");
    assert_eq!(config["edit"]["step_minutes"], 30);
}

#[test]
fn test_config_reset() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "edit.step_minutes", "15"]);
    assert_eq!(code, 0, "config set failed");

    let (stdout, _, code) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0, "config reset failed");
    assert!(stdout.contains("reset"));

    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "edit.step_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "30");
}
