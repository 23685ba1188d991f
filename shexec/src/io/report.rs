//! JSON run report written after a run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::types::{ExecutionResult, RunSummary};
use crate::run::RunReport;

#[derive(Serialize)]
struct ReportFile<'a> {
    dry_run: bool,
    summary: RunSummary,
    results: &'a [ExecutionResult],
}

/// Atomically write `report` as pretty JSON (temp file + rename).
pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let file = ReportFile {
        dry_run: report.dry_run,
        summary: report.summary(),
        results: &report.results,
    };
    let mut payload = serde_json::to_string_pretty(&file).context("serialize report json")?;
    payload.push('\n');

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload)
        .with_context(|| format!("write temp report {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace report {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ExecStatus;
    use crate::test_support::unit_id;
    use serde_json::Value;

    #[test]
    fn writes_summary_and_results() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("out/report.json");
        let unit = unit_id("a.toml");
        let report = RunReport {
            dry_run: false,
            units_loaded: 1,
            load_failures: 2,
            results: vec![
                ExecutionResult {
                    stdout: "hi\n".to_string(),
                    exit_code: Some(0),
                    ..ExecutionResult::without_output(&unit, 0, "echo hi", ExecStatus::Success)
                },
                ExecutionResult::without_output(&unit, 1, "echo hi", ExecStatus::Skipped),
            ],
        };

        write_report(&path, &report).expect("write report");
        let raw = fs::read_to_string(&path).expect("read report");
        let json: Value = serde_json::from_str(&raw).expect("parse report");

        assert_eq!(json["summary"]["load_failures"], 2);
        assert_eq!(json["summary"]["success"], 1);
        assert_eq!(json["summary"]["skipped"], 1);
        assert_eq!(json["results"][0]["status"], "SUCCESS");
        assert_eq!(json["results"][0]["stdout"], "hi\n");
        assert_eq!(json["results"][1]["status"], "SKIPPED");
        assert_eq!(json["results"][1]["unit"]["path"], "/units/a.toml");
        assert!(!temp.path().join("out/report.json.tmp").exists());
    }
}
