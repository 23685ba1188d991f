//! Orchestration of a full run: discover units, load each, execute its commands.
//!
//! Units are drained one at a time in discovery order. A unit that fails to
//! load is skipped with a warning. Only a fatal discovery error ends the run
//! early.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::dedup::DedupTable;
use crate::core::types::{ExecutionResult, RunSummary};
use crate::execute::ExecutionEngine;
use crate::io::discover::{DiscoveryError, discover};
use crate::io::loader::UnitLoader;
use crate::io::process::CommandRunner;

/// Everything a run produced, in execution order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub dry_run: bool,
    pub units_loaded: usize,
    pub load_failures: usize,
    pub results: Vec<ExecutionResult>,
}

impl RunReport {
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            units_loaded: self.units_loaded,
            load_failures: self.load_failures,
            ..RunSummary::default()
        };
        for result in &self.results {
            summary.record(result.status);
        }
        summary
    }
}

/// Run every unit found under `root` whose file name ends in `.<extension>`.
pub fn run_units<R: CommandRunner>(
    root: &Path,
    extension: &str,
    engine: &ExecutionEngine<R>,
) -> Result<RunReport, DiscoveryError> {
    debug!(root = %root.display(), extension, dry_run = engine.dry_run(), "starting run");
    let mut dedup = DedupTable::new();
    let mut report = RunReport {
        dry_run: engine.dry_run(),
        ..RunReport::default()
    };

    for candidate in discover(root, extension) {
        let candidate = candidate?;
        debug!(
            file = %candidate.file_name.to_string_lossy(),
            dir = %candidate.dir.display(),
            "found unit"
        );

        let mut loader = UnitLoader::new();
        let unit = match loader.load(&candidate.file_name, &candidate.dir) {
            Ok(unit) => unit,
            Err(err) => {
                warn!(
                    file = %candidate.file_name.to_string_lossy(),
                    dir = %candidate.dir.display(),
                    err = %err,
                    "failed to load unit, skipped"
                );
                report.load_failures += 1;
                continue;
            }
        };
        report.units_loaded += 1;

        let id = unit.id();
        for (index, command) in unit.commands().iter().enumerate() {
            let result = engine.execute(&id, index, command, &mut dedup);
            report.results.push(result);
        }
    }

    info!(summary = %report.summary(), "run finished");
    Ok(report)
}
