//! Tests for command-line handling of the binary

mod test_helpers;

use hand_gesture_control::{config::Config, source::save_session};
use std::process::Command;
use tempfile::NamedTempFile;
use test_helpers::*;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hand-gesture-control"))
}

#[test]
fn test_print_config_emits_defaults() {
    let output = binary().arg("--print-config").output().unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert_eq!(Config::from_yaml(&text).unwrap(), Config::default());
}

#[test]
fn test_replay_is_required() {
    let output = binary().output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--replay"));
}

#[test]
fn test_headless_replay_runs_to_completion() {
    let session = NamedTempFile::new().unwrap();
    let frames: Vec<_> = (0..5)
        .map(|i| frame(i as f64 * 33.0, vec![right((0.5, 0.5), RELAXED, APART)]))
        .collect();
    save_session(session.path(), &frames).unwrap();

    let output = binary()
        .arg("--replay")
        .arg(session.path())
        .args(["--fps", "500", "--no-mirror"])
        .output()
        .unwrap();
    assert!(output.status.success());
}

#[test]
fn test_missing_session_fails() {
    let output = binary()
        .args(["--replay", "/nonexistent/session.yaml"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_invalid_fps_rejected() {
    let output = binary().args(["--replay", "unused.yaml", "--fps", "0"]).output().unwrap();
    assert!(!output.status.success());
}
