//! Per-command execution policy: skip repeats, simulate in dry-run, else run.
//!
//! The order of checks is fixed: a command string already in the
//! [`DedupTable`] is always `SKIPPED`, even in dry-run mode. Only the first
//! occurrence of a string is executed (or simulated) and seeds the table.

use tracing::{debug, info};

use crate::core::dedup::DedupTable;
use crate::core::types::{ExecStatus, ExecutionResult, UnitId};
use crate::io::process::CommandRunner;

pub struct ExecutionEngine<R> {
    runner: R,
    dry_run: bool,
}

impl<R: CommandRunner> ExecutionEngine<R> {
    pub fn new(runner: R, dry_run: bool) -> Self {
        Self { runner, dry_run }
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Execute (or skip, or simulate) `command`, the `index`-th entry of `unit`.
    ///
    /// Records the result in `dedup` and returns it. Never fails: spawn errors
    /// become `FAILED` results.
    pub fn execute(
        &self,
        unit: &UnitId,
        index: usize,
        command: &str,
        dedup: &mut DedupTable,
    ) -> ExecutionResult {
        debug!(command, unit = %unit.name, index, "executing command");

        if dedup.contains(command) {
            let result = ExecutionResult::without_output(unit, index, command, ExecStatus::Skipped);
            info!(
                command,
                unit = %unit.path.display(),
                index,
                status = %result.status,
                "skipped command, already executed"
            );
            let appended = dedup.append(result.clone());
            debug_assert!(appended, "skip recorded for an unseeded command");
            return result;
        }

        let result = if self.dry_run {
            let result = ExecutionResult::without_output(unit, index, command, ExecStatus::DryRun);
            info!(
                command,
                unit = %unit.path.display(),
                index,
                status = %result.status,
                "executed command"
            );
            result
        } else {
            let result = self.run(unit, index, command);
            info!(
                command,
                unit = %unit.path.display(),
                index,
                status = %result.status,
                stdout = result.stdout.trim(),
                stderr = result.stderr.trim(),
                "executed command"
            );
            result
        };

        let seeded = dedup.seed(result.clone());
        debug_assert!(seeded, "command seeded twice");
        result
    }

    fn run(&self, unit: &UnitId, index: usize, command: &str) -> ExecutionResult {
        match self.runner.run(command) {
            Ok(output) => {
                let status = if output.status.success() {
                    ExecStatus::Success
                } else {
                    ExecStatus::Failed
                };
                ExecutionResult {
                    unit: unit.clone(),
                    index,
                    command: command.to_string(),
                    status,
                    stdout: output.stdout_text(),
                    stderr: output.stderr_text(),
                    exit_code: output.status.code(),
                    stdout_truncated: output.stdout_truncated,
                    stderr_truncated: output.stderr_truncated,
                }
            }
            Err(err) => ExecutionResult {
                stderr: format!("{err:#}"),
                ..ExecutionResult::without_output(unit, index, command, ExecStatus::Failed)
            },
        }
    }
}
