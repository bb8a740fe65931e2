use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const RULES: &str = r#"{
  "name": "can publish",
  "all": [
    { "field": "user.verified", "op": "==", "value": true },
    { "any": [
        { "field": "user.roles", "op": "contains", "value": "author" },
        { "field": "user.roles", "op": "contains", "value": "admin" }
      ],
      "name": "has role"
    },
    { "not": { "plan": "suspended" } }
  ]
}"#;

fn run_attest<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_attest");
    Command::new(bin)
        .args(args)
        .env_remove("ATTEST_LOG")
        .output()
        .expect("attest command should execute")
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("fixture should be written");
    path
}

fn fixture(subject: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let rules = write(dir.path(), "rules.json", RULES);
    let subject = write(dir.path(), "subject.json", subject);
    (dir, rules, subject)
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout should be JSON: {e}\nstdout:\n{}\nstderr:\n{}",
            stdout_text(output),
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

const PASSING_SUBJECT: &str =
    r#"{ "user": { "verified": true, "roles": ["author"] }, "plan": "pro" }"#;
const FAILING_SUBJECT: &str =
    r#"{ "user": { "verified": true, "roles": ["reader"] }, "plan": "pro" }"#;

#[test]
fn eval_prints_tree_and_root_cause() {
    let (_dir, rules, subject) = fixture(FAILING_SUBJECT);
    let output = run_attest([
        OsStr::new("eval"),
        OsStr::new("--rules"),
        rules.as_os_str(),
        OsStr::new("--subject"),
        subject.as_os_str(),
    ]);

    assert!(output.status.success());
    let text = stdout_text(&output);
    assert!(text.starts_with("[FAIL] can publish\n"));
    assert!(text.contains("[SKIP] not[plan == \"suspended\"]"));
    assert!(text.contains("outcome: false"));
    assert!(text.contains(
        "root cause: can publish > has role > user.roles contains \"author\""
    ));
}

#[test]
fn eval_json_payload() {
    let (_dir, rules, subject) = fixture(FAILING_SUBJECT);
    let output = run_attest([
        OsStr::new("eval"),
        OsStr::new("--rules"),
        rules.as_os_str(),
        OsStr::new("--subject"),
        subject.as_os_str(),
        OsStr::new("--json"),
    ]);

    assert!(output.status.success());
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["schema"], 1);
    assert_eq!(payload["kind"], "attest.eval.v1");
    assert_eq!(payload["outcome"], "false");
    assert_eq!(payload["rootCause"], "user.roles contains \"author\"");
    assert_eq!(payload["chain"].as_array().map(Vec::len), Some(3));
    assert_eq!(payload["fingerprint"].as_str().map(str::len), Some(64));
    assert_eq!(payload["evaluation"]["kind"], "and");
    assert_eq!(payload["evaluation"]["children"][2]["outcome"], "skipped");
}

#[test]
fn check_passes_with_exit_zero() {
    let (_dir, rules, subject) = fixture(PASSING_SUBJECT);
    let output = run_attest([
        OsStr::new("check"),
        OsStr::new("--rules"),
        rules.as_os_str(),
        OsStr::new("--subject"),
        subject.as_os_str(),
    ]);

    assert!(output.status.success());
    assert!(stdout_text(&output).contains("check passed: can publish"));
}

#[test]
fn check_failure_exits_one_with_report() {
    let (_dir, rules, subject) = fixture(FAILING_SUBJECT);
    let output = run_attest([
        OsStr::new("check"),
        OsStr::new("--rules"),
        rules.as_os_str(),
        OsStr::new("--subject"),
        subject.as_os_str(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout_text(&output);
    assert!(text.starts_with("verification failed: user.roles contains \"author\"\n"));
    assert!(text.contains("  <- root cause"));
}

#[test]
fn config_controls_rendering() {
    let (dir, rules, subject) = fixture(FAILING_SUBJECT);
    let config = write(
        dir.path(),
        "attest.toml",
        "indent = 4\nshow_rationale = false\n",
    );
    let output = run_attest([
        OsStr::new("eval"),
        OsStr::new("--rules"),
        rules.as_os_str(),
        OsStr::new("--subject"),
        subject.as_os_str(),
        OsStr::new("--config"),
        config.as_os_str(),
    ]);

    assert!(output.status.success());
    let text = stdout_text(&output);
    assert!(text.contains("\n    [PASS] user.verified == true\n"));
    assert!(!text.contains("expected:"));
}

#[test]
fn invalid_rules_are_reported_with_a_path() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let rules = write(dir.path(), "rules.json", r#"{ "all": [ { "x": { "~": 1 } } ] }"#);
    let subject = write(dir.path(), "subject.json", "{}");
    let output = run_attest([
        OsStr::new("eval"),
        OsStr::new("--rules"),
        rules.as_os_str(),
        OsStr::new("--subject"),
        subject.as_os_str(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: invalid rules at"));
    assert!(stderr.contains("$.all[0].x: unknown operator: '~'"));
}

#[test]
fn unreadable_subject_fails() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let rules = write(dir.path(), "rules.json", "true");
    let output = run_attest([
        OsStr::new("eval"),
        OsStr::new("--rules"),
        rules.as_os_str(),
        OsStr::new("--subject"),
        dir.path().join("missing.json").as_os_str(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read subject"));
}

const EITHER_RULES: &str = r#"{
  "name": "either",
  "any": [
    { "field": "plan", "value": "enterprise" },
    { "field": "plan", "value": "pro" }
  ]
}"#;

#[test]
fn passing_any_with_failed_branch_has_no_root_cause() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let rules = write(dir.path(), "rules.json", EITHER_RULES);
    let subject = write(dir.path(), "subject.json", r#"{ "plan": "pro" }"#);
    let args = |json: bool| {
        let mut args = vec![
            OsStr::new("eval").to_os_string(),
            OsStr::new("--rules").to_os_string(),
            rules.as_os_str().to_os_string(),
            OsStr::new("--subject").to_os_string(),
            subject.as_os_str().to_os_string(),
        ];
        if json {
            args.push(OsStr::new("--json").to_os_string());
        }
        args
    };

    let output = run_attest(args(false));
    assert!(output.status.success());
    let text = stdout_text(&output);
    assert!(text.contains("[FAIL] plan == \"enterprise\"\n"));
    assert!(text.contains("outcome: true"));
    assert!(!text.contains("root cause"));

    let payload = parse_json_stdout(&run_attest(args(true)));
    assert_eq!(payload["outcome"], "true");
    assert!(payload["rootCause"].is_null());
    assert!(payload["chain"].is_null());
}

#[test]
fn implicit_fields_run_in_document_order() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let rules = write(dir.path(), "rules.json", r#"{ "zeta": 1, "alpha": 2 }"#);
    let subject = write(dir.path(), "subject.json", "{}");
    let output = run_attest([
        OsStr::new("check"),
        OsStr::new("--rules"),
        rules.as_os_str(),
        OsStr::new("--subject"),
        subject.as_os_str(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout_text(&output);
    assert!(text.starts_with("verification failed: zeta == 1\n"));
    assert!(text.contains("[SKIP] alpha == 2"));
}
