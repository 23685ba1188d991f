//! Deterministic recursive discovery of unit files.
//!
//! Directory entries are visited in lexicographic order, depth-first, and
//! symbolic links are followed. Listing a directory that vanished or is not
//! readable only skips that directory; any other listing error ends discovery
//! with a [`DiscoveryError`].

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{self, ErrorKind};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::vec;

use thiserror::Error;
use tracing::{debug, error};

/// Unrecoverable I/O failure while walking the tree.
#[derive(Debug, Error)]
#[error("list directory {}: {source}", .path.display())]
pub struct DiscoveryError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// A discovered file eligible for loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub dir: PathBuf,
    pub file_name: OsString,
}

impl CandidateFile {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// Walk `root` for files whose name ends in `.<extension>`.
///
/// The returned iterator is lazy and single-pass. After it yields an `Err`
/// it is exhausted.
pub fn discover(root: impl Into<PathBuf>, extension: &str) -> Discover {
    Discover {
        suffix: format!(".{extension}"),
        root: Some(root.into()),
        stack: Vec::new(),
        failed: false,
        list: list_sorted,
    }
}

pub struct Discover {
    suffix: String,
    root: Option<PathBuf>,
    stack: Vec<Listing>,
    failed: bool,
    list: fn(&Path) -> io::Result<Vec<OsString>>,
}

/// Sorted, partially consumed listing of one directory.
struct Listing {
    dir: PathBuf,
    entries: vec::IntoIter<OsString>,
}

enum EntryKind {
    File,
    Dir,
    Other,
}

impl Discover {
    fn matches(&self, file_name: &OsStr) -> bool {
        file_name.to_string_lossy().ends_with(&self.suffix)
    }

    fn start(&mut self, root: PathBuf) -> Result<Option<CandidateFile>, DiscoveryError> {
        match entry_kind(&root) {
            EntryKind::File => match root.file_name() {
                Some(name) if self.matches(name) => {
                    let dir = root.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
                    return Ok(Some(CandidateFile {
                        dir,
                        file_name: name.to_os_string(),
                    }));
                }
                _ => debug!(path = %root.display(), "not a valid file or directory, skipped"),
            },
            EntryKind::Dir => self.push_dir(root)?,
            EntryKind::Other => {
                debug!(path = %root.display(), "not a valid file or directory, skipped");
            }
        }
        Ok(None)
    }

    fn push_dir(&mut self, dir: PathBuf) -> Result<(), DiscoveryError> {
        match (self.list)(&dir) {
            Ok(entries) => {
                self.stack.push(Listing {
                    dir,
                    entries: entries.into_iter(),
                });
                Ok(())
            }
            Err(err) if is_skippable(&err) => {
                debug!(path = %dir.display(), err = %err, "cannot list directory, skipped");
                Ok(())
            }
            Err(source) => Err(DiscoveryError { path: dir, source }),
        }
    }

    fn advance(&mut self) -> Result<Option<CandidateFile>, DiscoveryError> {
        if let Some(root) = self.root.take()
            && let Some(candidate) = self.start(root)?
        {
            return Ok(Some(candidate));
        }

        loop {
            let Some(listing) = self.stack.last_mut() else {
                return Ok(None);
            };
            let Some(file_name) = listing.entries.next() else {
                self.stack.pop();
                continue;
            };
            let dir = listing.dir.clone();
            let path = dir.join(&file_name);
            match entry_kind(&path) {
                EntryKind::File if self.matches(&file_name) => {
                    return Ok(Some(CandidateFile { dir, file_name }));
                }
                EntryKind::Dir => self.push_dir(path)?,
                EntryKind::File | EntryKind::Other => {
                    debug!(path = %path.display(), "not a valid file or directory, skipped");
                }
            }
        }
    }
}

impl Iterator for Discover {
    type Item = Result<CandidateFile, DiscoveryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.advance() {
            Ok(candidate) => candidate.map(Ok),
            Err(err) => {
                error!(err = %err, "discovery aborted");
                self.failed = true;
                self.stack.clear();
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Discover {}

/// Classify `path` by what it resolves to. Unresolvable paths are `Other`.
fn entry_kind(path: &Path) -> EntryKind {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => EntryKind::File,
        Ok(meta) if meta.is_dir() => EntryKind::Dir,
        _ => EntryKind::Other,
    }
}

fn list_sorted(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut names = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

fn is_skippable(err: &io::Error) -> bool {
    matches!(err.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied)
}
