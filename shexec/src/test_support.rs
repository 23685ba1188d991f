//! Test-only helpers: a scripted command runner and unit file fixtures.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use anyhow::{Context, Result, anyhow};

use crate::core::types::UnitId;
use crate::io::process::{CommandOutput, CommandRunner};

/// One queued response of a [`ScriptedRunner`].
#[derive(Debug, Clone)]
pub enum Scripted {
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    SpawnError(String),
}

/// Command runner that replays queued responses and records every command it saw.
///
/// Once the queue is empty every command exits 0 with no output.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    queue: RefCell<VecDeque<Scripted>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            queue: RefCell::new(script.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn succeeding() -> Self {
        Self::default()
    }

    /// Commands passed to `run`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &str) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(command.to_string());
        let next = self.queue.borrow_mut().pop_front();
        match next {
            None => Ok(output(0, "", "")),
            Some(Scripted::Exit {
                code,
                stdout,
                stderr,
            }) => Ok(output(code, &stdout, &stderr)),
            Some(Scripted::SpawnError(message)) => {
                Err(anyhow!(message)).context("spawn command")
            }
        }
    }
}

fn output(code: i32, stdout: &str, stderr: &str) -> CommandOutput {
    CommandOutput {
        status: exit_status(code),
        stdout: stdout.as_bytes().to_vec(),
        stderr: stderr.as_bytes().to_vec(),
        stdout_truncated: 0,
        stderr_truncated: 0,
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Deterministic unit identity rooted at `/units`.
pub fn unit_id(name: &str) -> UnitId {
    UnitId {
        name: name.to_string(),
        path: Path::new("/units").join(name),
    }
}

/// Write a unit file at `root/relative` declaring `commands` as its `CMDS`.
pub fn write_unit(root: &Path, relative: &str, commands: &[&str]) -> Result<PathBuf> {
    let quoted: Vec<String> = commands
        .iter()
        .map(|cmd| toml::Value::String((*cmd).to_string()).to_string())
        .collect();
    write_raw_unit(root, relative, &format!("CMDS = [{}]\n", quoted.join(", ")))
}

/// Write arbitrary unit file contents at `root/relative`.
pub fn write_raw_unit(root: &Path, relative: &str, contents: &str) -> Result<PathBuf> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
