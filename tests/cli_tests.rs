//! CLI integration tests.
//!
//! Tests the jsonast CLI commands by invoking the binary as a subprocess.

use std::io::Write;
use std::process::{Command, Stdio};

fn run_command(args: &[&str], input: &str) -> (i32, String, String) {
    let binary = env!("CARGO_BIN_EXE_jsonast");
    let mut child = Command::new(binary)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("Failed to spawn jsonast at {:?}: {}", binary, e));

    {
        let stdin = child.stdin.as_mut().unwrap();
        // The child may exit (e.g. on a usage error) before reading stdin.
        if let Err(e) = stdin.write_all(input.as_bytes()) {
            assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe, "{}", e);
        }
    }

    let output = child.wait_with_output().unwrap();
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

// ============================================================================
// Check Command Tests
// ============================================================================

#[test]
fn cli_check_valid_document() {
    let input = r#"{"a": 123, "b": "v", "c": [true, false, null]}"#;
    let (code, stdout, _stderr) = run_command(&["check"], input);
    assert_eq!(code, 0, "Expected success exit code");
    assert_eq!(stdout.trim(), "ok");
}

#[test]
fn cli_check_reports_error_code() {
    let (code, stdout, stderr) = run_command(&["check"], "[1,]");
    assert_eq!(code, 1, "Expected failure exit code");
    assert!(stdout.is_empty(), "Unexpected stdout: {}", stdout);
    assert!(
        stderr.contains("error[E201]") && stderr.contains("trailing comma"),
        "Expected trailing comma diagnostic: {}",
        stderr
    );
}

#[test]
fn cli_check_lexical_error() {
    let (code, _stdout, stderr) = run_command(&["check"], "trae");
    assert_eq!(code, 1);
    assert!(
        stderr.contains("unexpected token `a` at byte 2"),
        "Expected keyword diagnostic: {}",
        stderr
    );
}

#[test]
fn cli_check_trailing_content_flags() {
    let (code, _stdout, stderr) = run_command(&["check"], "true false");
    assert_eq!(code, 1);
    assert!(stderr.contains("error[E202]"), "{}", stderr);

    let (code, stdout, _stderr) = run_command(&["check", "--allow-trailing"], "true false");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (code, _stdout, _stderr) = run_command(&["check", "--lenient"], "true false");
    assert_eq!(code, 0);
}

#[test]
fn cli_check_depth_and_duplicate_flags() {
    let (code, _stdout, stderr) = run_command(&["check", "--max-depth", "1"], "[[]]");
    assert_eq!(code, 1);
    assert!(stderr.contains("error[E301]"), "{}", stderr);

    let input = r#"{"k": 1, "k": 2}"#;
    let (code, _stdout, _stderr) = run_command(&["check"], input);
    assert_eq!(code, 0);
    let (code, _stdout, stderr) = run_command(&["check", "--reject-duplicate-keys"], input);
    assert_eq!(code, 1);
    assert!(stderr.contains("error[E203]"), "{}", stderr);
}

#[test]
fn cli_check_max_depth_is_bounded() {
    let (code, stdout, _stderr) = run_command(&["check", "--max-depth", "1024"], "[[[]]]");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (code, stdout, stderr) = run_command(&["check", "--max-depth", "1000000"], "[]");
    assert_eq!(code, 2, "Expected usage error exit code");
    assert!(stdout.is_empty(), "Unexpected stdout: {}", stdout);
    assert!(stderr.contains("--max-depth"), "{}", stderr);
}

#[test]
fn cli_check_reads_file() {
    let path = std::env::temp_dir().join(format!("jsonast-cli-{}.json", std::process::id()));
    std::fs::write(&path, "[1, 2, 3]").unwrap();
    let (code, stdout, _stderr) = run_command(&["check", path.to_str().unwrap()], "");
    std::fs::remove_file(&path).ok();
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");
}

#[test]
fn cli_check_missing_file() {
    let (code, _stdout, stderr) = run_command(&["check", "/nonexistent/jsonast/input.json"], "");
    assert_eq!(code, 2);
    assert!(stderr.contains("could not read input"), "{}", stderr);
}

// ============================================================================
// Tokens Command Tests
// ============================================================================

#[test]
fn cli_tokens_lists_spans() {
    let (code, stdout, _stderr) = run_command(&["tokens"], r#"[1, "a"]"#);
    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "0..1\tLeftBracket",
            "1..2\tNumber(1.0)",
            "2..3\tComma",
            "4..7\tString(\"a\")",
            "7..8\tRightBracket",
            "8..8\tEndOfFile",
        ]
    );
}

#[test]
fn cli_tokens_stops_at_lexical_error() {
    let (code, stdout, stderr) = run_command(&["tokens"], "[00]");
    assert_eq!(code, 1);
    assert_eq!(stdout.lines().count(), 1);
    assert!(stderr.contains("error[E101]"), "{}", stderr);
}

// ============================================================================
// Tree Command Tests
// ============================================================================

#[test]
fn cli_tree_prints_structure() {
    let (code, stdout, _stderr) = run_command(&["tree"], r#"{"name": [true]}"#);
    assert_eq!(code, 0);
    assert!(stdout.contains("Object("), "{}", stdout);
    assert!(stdout.contains("name: \"name\""), "{}", stdout);
    assert!(stdout.contains("Bool(\n"), "{}", stdout);
}
