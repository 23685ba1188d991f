//! Executor configuration read from an optional TOML file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::io::process::ShellRunner;

/// Executor configuration (TOML).
///
/// Missing fields default to values that match running `sh -c` over `*.toml` units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExecConfig {
    /// Unit file extension, without the leading dot.
    pub extension: String,

    /// Keep at most this many bytes of stdout and of stderr per command.
    /// Unset keeps the full output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_limit_bytes: Option<usize>,

    pub shell: ShellConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShellConfig {
    /// Interpreter program; the command string is passed as its last argument.
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: "sh".to_string(),
            args: vec!["-c".to_string()],
        }
    }
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            extension: "toml".to_string(),
            output_limit_bytes: None,
            shell: ShellConfig::default(),
        }
    }
}

impl ExecConfig {
    pub fn validate(&self) -> Result<()> {
        if self.extension.trim().is_empty() {
            return Err(anyhow!("extension must be non-empty"));
        }
        if self.extension.starts_with('.') {
            return Err(anyhow!("extension must not start with '.'"));
        }
        if self.output_limit_bytes == Some(0) {
            return Err(anyhow!("output_limit_bytes must be > 0"));
        }
        if self.shell.program.trim().is_empty() {
            return Err(anyhow!("shell.program must be non-empty"));
        }
        Ok(())
    }

    pub fn shell_runner(&self) -> ShellRunner {
        ShellRunner {
            program: self.shell.program.clone(),
            args: self.shell.args.clone(),
            output_limit_bytes: self.output_limit_bytes,
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ExecConfig::default()`.
pub fn load_config(path: &Path) -> Result<ExecConfig> {
    if !path.exists() {
        let cfg = ExecConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ExecConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
