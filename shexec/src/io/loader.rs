//! Loading a candidate file into an [`ExecutableUnit`].
//!
//! A [`UnitLoader`] is single-use: it loads one file, after which its identity
//! and command list are available. Every failure is a [`LoadError`] so the
//! orchestrator can skip the file and keep going.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::manifest::{ManifestError, parse_command_list};
use crate::core::types::UnitId;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unit already loaded")]
    AlreadyLoaded,

    #[error("unit not loaded yet")]
    NotLoaded,

    #[error("failed to load unit from {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to evaluate unit {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("CMDS with list-of-strings type not found in {}: {reason}", .path.display())]
    MissingCommandList { path: PathBuf, reason: String },
}

/// A successfully loaded unit file and its immutable command list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableUnit {
    name: String,
    path: PathBuf,
    commands: Vec<String>,
}

impl ExecutableUnit {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn id(&self) -> UnitId {
        UnitId {
            name: self.name.clone(),
            path: self.path.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct UnitLoader {
    unit: Option<ExecutableUnit>,
}

impl UnitLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `dir/file_name`, returning the unit on success.
    ///
    /// Errors with [`LoadError::AlreadyLoaded`] if this loader already holds a unit.
    pub fn load(
        &mut self,
        file_name: impl AsRef<OsStr>,
        dir: &Path,
    ) -> Result<&ExecutableUnit, LoadError> {
        if self.unit.is_some() {
            return Err(LoadError::AlreadyLoaded);
        }

        let file_name = file_name.as_ref();
        let path = resolve_path(&dir.join(file_name))?;
        let contents = std::fs::read_to_string(&path).map_err(|source| LoadError::Unreadable {
            path: path.clone(),
            source,
        })?;
        let commands = parse_command_list(&contents).map_err(|err| match err {
            ManifestError::Parse(source) => LoadError::Parse {
                path: path.clone(),
                source,
            },
            ManifestError::MissingCommandList(reason) => LoadError::MissingCommandList {
                path: path.clone(),
                reason,
            },
        })?;
        debug!(unit = %path.display(), commands = ?commands, "loaded unit");

        Ok(&*self.unit.insert(ExecutableUnit {
            name: file_name.to_string_lossy().into_owned(),
            path,
            commands,
        }))
    }

    pub fn unit(&self) -> Result<&ExecutableUnit, LoadError> {
        self.unit.as_ref().ok_or(LoadError::NotLoaded)
    }

    pub fn module_name(&self) -> Result<&str, LoadError> {
        self.unit().map(ExecutableUnit::name)
    }

    pub fn module_path(&self) -> Result<&Path, LoadError> {
        self.unit().map(ExecutableUnit::path)
    }

    pub fn commands(&self) -> Result<&[String], LoadError> {
        self.unit().map(ExecutableUnit::commands)
    }
}

fn resolve_path(path: &Path) -> Result<PathBuf, LoadError> {
    std::path::absolute(path).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}
