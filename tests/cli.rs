use std::io::Write;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;

fn jpx(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jpx"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run jpx")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

const DOC: &str = r#"{"a":[{"n":1},{"n":5},{"n":5}]}"#;

#[test]
fn test_matches_exit_zero() {
    let out = jpx(&[DOC, "$.a[*].n", "--compact"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "[1,5,5]");
}

#[test]
fn test_post_processing_flags() {
    let out = jpx(&[DOC, "$.a[?(@.n > 2)].n", "--compact", "--unique"]);
    assert_eq!(stdout(&out), "[5]");

    let out = jpx(&[DOC, "$.a[*].n", "--first"]);
    assert_eq!(stdout(&out), "1");

    let out = jpx(&[DOC, "$.missing", "--default", "\"none\""]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "\"none\"");
}

#[test]
fn test_no_match_is_success() {
    let out = jpx(&[DOC, "$.missing", "--compact"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "[]");
}

#[test]
fn test_invalid_document_exits_one() {
    let out = jpx(&["{not json", "$"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid JSON"));
}

#[test]
fn test_unreadable_file_exits_one() {
    let out = jpx(&["@/nonexistent/doc.json", "$"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_path_syntax_error_exits_two() {
    let out = jpx(&[DOC, "$.a[0"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unmatched '['"));
    assert_eq!(stdout(&out), "");

    let out = jpx(&[DOC, "$.a[0", "--tokens"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_tokens_output() {
    let out = jpx(&["-", "$.a[1:2]", "--tokens", "--compact"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        stdout(&out),
        r#"["Root",{"Field":"a"},{"Slice":{"start":1,"end":2}}]"#
    );
}

#[test]
fn test_document_from_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_jpx"))
        .args(["-", "$.a[-1].n"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn jpx");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(DOC.as_bytes())
        .expect("write stdin");
    let out = child.wait_with_output().expect("wait for jpx");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "[\n  5\n]");
}
