//! CLI tests for the `shexec` binary.
//!
//! Spawns the binary against temp unit trees and checks exit codes, the
//! summary line, and the JSON report.

#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use shexec::exit_codes;
use shexec::test_support::{write_raw_unit, write_unit};

fn shexec(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shexec"))
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run shexec")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn run_prints_summary_and_exits_ok() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_unit(temp.path(), "units/a.toml", &["echo a", "echo a", "exit 3"]).expect("write");
    write_raw_unit(temp.path(), "units/broken.toml", "CMDS = 1\n").expect("write");

    let output = shexec(&["units"], temp.path());

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        stdout(&output),
        "summary: units=1 load_failures=1 success=1 failed=1 skipped=1 dry_run=0\n"
    );
    let logs = String::from_utf8_lossy(&output.stderr);
    assert!(logs.contains("failed to load unit"), "{logs}");
}

#[test]
fn dry_run_flag_executes_nothing() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_unit(temp.path(), "units/a.toml", &["touch created", "touch created"]).expect("write");

    let output = shexec(&["--dry-run", "units"], temp.path());

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(!temp.path().join("created").exists());
    assert_eq!(
        stdout(&output),
        "summary: units=1 load_failures=0 success=0 failed=0 skipped=1 dry_run=1\n"
    );
}

#[test]
fn missing_root_completes_normally() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = shexec(&["no-such-dir"], temp.path());

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        stdout(&output),
        "summary: units=0 load_failures=0 success=0 failed=0 skipped=0 dry_run=0\n"
    );
}

#[test]
fn report_flag_writes_results_json() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_unit(
        temp.path(),
        "units/a.toml",
        &["echo out; echo oops >&2; exit 2", "echo out; echo oops >&2; exit 2"],
    )
    .expect("write");

    let output = shexec(&["-r", "out/report.json", "units"], temp.path());
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let raw = fs::read_to_string(temp.path().join("out/report.json")).expect("read report");
    let report: Value = serde_json::from_str(&raw).expect("parse report");
    let results = report["results"].as_array().expect("results array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["status"], "FAILED");
    assert_eq!(results[0]["exit_code"], 2);
    assert_eq!(results[0]["stdout"], "out\n");
    assert_eq!(results[0]["stderr"], "oops\n");
    assert_eq!(results[1]["status"], "SKIPPED");
    assert_eq!(results[1]["index"], 1);
    assert_eq!(report["summary"]["failed"], 1);
}

#[test]
fn config_selects_extension_and_shell() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(
        temp.path().join("shexec.toml"),
        "extension = \"cmds\"\n\n[shell]\nprogram = \"sh\"\nargs = [\"-e\", \"-c\"]\n",
    )
    .expect("write config");
    write_unit(temp.path(), "units/a.cmds", &["false; echo unreachable"]).expect("write");
    write_unit(temp.path(), "units/ignored.toml", &["echo ignored"]).expect("write");

    let output = shexec(&["-c", "shexec.toml", "-r", "report.json", "units"], temp.path());
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let raw = fs::read_to_string(temp.path().join("report.json")).expect("read report");
    let report: Value = serde_json::from_str(&raw).expect("parse report");
    let results = report["results"].as_array().expect("results array");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["unit"]["name"], "a.cmds");
    assert_eq!(results[0]["status"], "FAILED");
    assert_eq!(results[0]["stdout"], "");
}

#[test]
fn invalid_config_is_fatal() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("bad.toml"), "output_limit_bytes = 0\n").expect("write config");

    let output = shexec(&["--config", "bad.toml", "."], temp.path());

    assert_eq!(output.status.code(), Some(exit_codes::FATAL));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("output_limit_bytes"), "{stderr}");
    assert!(stdout(&output).is_empty());
}
