use std::process::Command;

fn run(fixture: &str) -> (String, String, bool) {
    let path = format!("tests/fixtures/{fixture}");
    let output = Command::new(env!("CARGO_BIN_EXE_points-ledger"))
        .arg(&path)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn valid_commands() {
    let (stdout, stderr, success) = run("valid.csv");

    assert!(success);
    assert!(stderr.is_empty());

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            r#"[{"payer":"DANNON","points":-300},{"payer":"UNILEVER","points":-200},{"payer":"MILLER COORS","points":-4500}]"#,
            r#"{"DANNON":1000,"MILLER COORS":5500,"UNILEVER":0}"#,
        ]
    );
}

#[test]
fn equal_timestamps_spend_in_file_order() {
    let (stdout, _, success) = run("same_timestamp.csv");

    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            r#"[{"payer":"B","points":-5},{"payer":"A","points":-2}]"#,
            r#"[{"payer":"A","points":-3},{"payer":"LATER","points":-5}]"#,
            r#"{"A":0,"B":0,"LATER":0}"#,
        ]
    );
}

#[test]
fn errors_warn_but_do_not_block() {
    let (stdout, stderr, success) = run("with_errors.csv");

    assert!(success);
    assert!(stderr.contains("unrecognized command type"));
    assert!(stderr.contains("spend missing points"));
    assert!(stderr.contains("unparseable timestamp"));
    assert!(stderr.contains("insufficient funds"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            r#"{"msg":"deposit rejected: points must not be negative, got -1"}"#,
            r#"{"msg":"deposit rejected: unparseable timestamp 'not-a-time'"}"#,
            r#"{"msg":"spend rejected: insufficient funds: available 5, requested 6"}"#,
            r#"[{"payer":"A","points":-5},{"payer":"B","points":-2}]"#,
            r#"{"A":0,"B":8}"#,
        ]
    );
}

#[test]
fn every_rejected_deposit_gets_a_response_line() {
    let (stdout, stderr, success) = run("rejected_deposits.csv");

    assert!(success);
    assert!(stderr.contains("unparseable timestamp"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            r#"{"msg":"deposit rejected: points must not be negative, got -1"}"#,
            r#"{"msg":"deposit rejected: unparseable timestamp 'not-a-time'"}"#,
            "{}",
        ]
    );
}

#[test]
fn missing_argument_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_points-ledger"))
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn unreadable_file_fails() {
    let (stdout, stderr, success) = run("does_not_exist.csv");

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("failed to open command file"));
}
