//! Run the shell commands declared by unit files under a directory.
//!
//! Every `*.toml` unit found under ROOT contributes its `CMDS` list. Each
//! distinct command string runs at most once per invocation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use shexec::execute::ExecutionEngine;
use shexec::exit_codes;
use shexec::io::config::{ExecConfig, load_config};
use shexec::io::report::write_report;
use shexec::logging;
use shexec::run::run_units;

#[derive(Parser)]
#[command(
    name = "shexec",
    version,
    about = "Execute shell commands declared in unit files"
)]
struct Cli {
    /// Root directory (or single unit file) to search for units.
    root: PathBuf,

    /// Enable debug logging.
    #[arg(short, long)]
    debug: bool,

    /// Record what would run without executing anything.
    #[arg(short = 't', long)]
    dry_run: bool,

    /// TOML config file (extension, shell, output limit). Missing file means defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write every result and the summary as JSON to this path.
    #[arg(short, long)]
    report: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);
    if let Err(err) = run(cli) {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::FATAL);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path).context("load config")?,
        None => ExecConfig::default(),
    };

    if cli.dry_run {
        info!("dry-run mode enabled, commands will NOT be executed");
    }

    let engine = ExecutionEngine::new(config.shell_runner(), cli.dry_run);
    let report = run_units(&cli.root, &config.extension, &engine)
        .with_context(|| format!("discover units under {}", cli.root.display()))?;

    if let Some(path) = &cli.report {
        write_report(path, &report).context("write report")?;
    }

    println!("summary: {}", report.summary());
    Ok(())
}
