//! CLI integration tests.
//!
//! These tests verify the binary's argument handling and the stdin decode
//! path. Nothing here needs a live WebSocket server.

use std::io::Write;
use std::process::{Command, Stdio};

/// Run the barograph binary with arguments and optional stdin.
fn run_barograph(args: &[&str], stdin: Option<&str>) -> std::process::Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_barograph"));
    command.args(args);

    if stdin.is_some() {
        command.stdin(Stdio::piped());
    }
    command.stdout(Stdio::piped()).stderr(Stdio::piped());

    let mut child = command.spawn().expect("Failed to run barograph binary");

    if let Some(input) = stdin {
        child
            .stdin
            .take()
            .expect("stdin not captured")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
    }

    child.wait_with_output().expect("Failed to wait on barograph")
}

#[test]
fn test_help_lists_commands() {
    let output = run_barograph(&["--help"], None);
    assert!(output.status.success(), "Help should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("watch"), "Help should list watch command");
    assert!(stdout.contains("decode"), "Help should list decode command");
}

#[test]
fn test_version() {
    let output = run_barograph(&["--version"], None);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("barograph"));
}

#[test]
fn test_decode_classifies_frames() {
    let frames = concat!(
        r#"{"type": "pressure", "pressure": 1013.2}"#,
        "\n",
        r#"{"type": "error", "message": "sensor offline"}"#,
        "\n",
        r#"{"type": "hello", "message": "welcome"}"#,
        "\n",
        "not json at all\n",
    );

    let output = run_barograph(&["decode"], Some(frames));
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("reading"));
    assert!(lines[0].contains("1013.20"));
    assert!(lines[1].starts_with("error"));
    assert!(lines[1].contains("sensor offline"));
    assert_eq!(lines[2], "handshake");
    assert_eq!(lines[3], "ignored");
}

#[test]
fn test_decode_multi_requires_device_id() {
    let frames = concat!(
        r#"{"type": "pressure", "pressure": 1013.2}"#,
        "\n",
        r#"{"type": "pressure", "pressure": 1013.2, "deviceId": "well-3"}"#,
        "\n",
    );

    let output = run_barograph(&["decode", "--multi"], Some(frames));
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "ignored");
    assert!(lines[1].starts_with("reading"));
    assert!(lines[1].contains("well-3"));
}

#[test]
fn test_watch_rejects_non_websocket_url() {
    let output = run_barograph(&["watch", "--url", "http://localhost:8080/ws"], None);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ws://") || stderr.contains("validation"));
}
