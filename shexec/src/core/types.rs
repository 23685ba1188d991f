//! Shared deterministic types for execution outcomes.
//!
//! These types define stable contracts between the engine, the orchestrator and
//! the reporting layer. They carry no I/O and serialize in a stable shape.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Outcome of one attempt at a command.
///
/// `Success`/`Failed` only come from real execution. `Skipped` means the
/// identical command string was already recorded earlier in the same run.
/// `DryRun` means execution was simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecStatus {
    Success,
    Failed,
    Skipped,
    DryRun,
}

impl ExecStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExecStatus::Success => "SUCCESS",
            ExecStatus::Failed => "FAILED",
            ExecStatus::Skipped => "SKIPPED",
            ExecStatus::DryRun => "DRY_RUN",
        }
    }
}

impl fmt::Display for ExecStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a loaded unit, as referenced by its results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId {
    /// File name the unit was loaded from.
    pub name: String,
    /// Absolute path of the unit file.
    pub path: PathBuf,
}

/// One recorded attempt (executed, simulated or skipped) of a unit command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub unit: UnitId,
    /// Zero-based position of the command in the unit's `CMDS`.
    pub index: usize,
    pub command: String,
    pub status: ExecStatus,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    /// Process exit code; `None` when nothing ran or the process was killed by a signal.
    #[serde(default)]
    pub exit_code: Option<i32>,
    #[serde(default)]
    pub stdout_truncated: usize,
    #[serde(default)]
    pub stderr_truncated: usize,
}

impl ExecutionResult {
    /// Result with no captured output (skipped, dry-run).
    pub fn without_output(unit: &UnitId, index: usize, command: &str, status: ExecStatus) -> Self {
        Self {
            unit: unit.clone(),
            index,
            command: command.to_string(),
            status,
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
            stdout_truncated: 0,
            stderr_truncated: 0,
        }
    }
}

/// Per-status counters over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub units_loaded: usize,
    pub load_failures: usize,
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
    pub dry_run: usize,
}

impl RunSummary {
    pub fn record(&mut self, status: ExecStatus) {
        match status {
            ExecStatus::Success => self.success += 1,
            ExecStatus::Failed => self.failed += 1,
            ExecStatus::Skipped => self.skipped += 1,
            ExecStatus::DryRun => self.dry_run += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.success + self.failed + self.skipped + self.dry_run
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "units={} load_failures={} success={} failed={} skipped={} dry_run={}",
            self.units_loaded,
            self.load_failures,
            self.success,
            self.failed,
            self.skipped,
            self.dry_run
        )
    }
}
