//! Materializes a [`Plan`] under a project root.
//!
//! Entries are processed strictly in plan order. A failing entry is recorded and the
//! writer moves on, so the report always has exactly one outcome per planned entry.
//! File contents are written to a temp file next to the target and renamed into place,
//! so a target is either absent, unchanged, or complete.

use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::WriteError;
use crate::planner::{Plan, PlannedEntry, PlannedFile};
use crate::report::{EntryKind, ReportEntry, ScaffoldReport, WriteOutcome};

/// What to do when a planned file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Record the file as failed and leave it untouched.
    #[default]
    Fail,
    /// Leave the file untouched and record it as skipped.
    Skip,
    /// Replace the file's content.
    Overwrite,
}

impl ConflictPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Skip => "skip",
            Self::Overwrite => "overwrite",
        }
    }
}

/// What currently occupies a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Missing,
    File,
    Directory,
}

/// Filesystem operations the writer needs. Paths are absolute.
pub trait FileSystem {
    fn path_state(&self, path: &Path) -> io::Result<PathState>;

    /// Create `path` and all its parents; succeeds if it already exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Atomically create a file that must not exist yet.
    fn write_new(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Atomically replace an existing file.
    fn replace(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// The real filesystem, with write-to-temp-then-rename file writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    fn stage(path: &Path, contents: &[u8]) -> io::Result<NamedTempFile> {
        let dir = path.parent().unwrap_or(Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        Ok(tmp)
    }
}

impl FileSystem for LocalFileSystem {
    fn path_state(&self, path: &Path) -> io::Result<PathState> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(PathState::Directory),
            Ok(_) => Ok(PathState::File),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(PathState::Missing),
            Err(e) => Err(e),
        }
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write_new(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        Self::stage(path, contents)?
            .persist_noclobber(path)
            .map_err(|e| e.error)?;
        Ok(())
    }

    fn replace(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        Self::stage(path, contents)?
            .persist(path)
            .map_err(|e| e.error)?;
        Ok(())
    }
}

/// Writes plans into one project root.
pub struct FileTreeWriter<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    root: &'a Path,
}

impl<'a, F: FileSystem + ?Sized> FileTreeWriter<'a, F> {
    pub fn new(fs: &'a F, root: &'a Path) -> Self {
        Self { fs, root }
    }

    /// Apply every entry of `plan` in order and report each outcome.
    pub fn write(&self, plan: &Plan, policy: ConflictPolicy) -> ScaffoldReport {
        let mut report = ScaffoldReport::new(self.root);

        for entry in plan.entries() {
            let report_entry = match entry {
                PlannedEntry::Directory { path } => ReportEntry {
                    path: path.clone(),
                    entry: EntryKind::Directory,
                    template: None,
                    digest: None,
                    outcome: self.create_directory(path),
                },
                PlannedEntry::File(file) => ReportEntry {
                    path: file.path.clone(),
                    entry: EntryKind::File,
                    template: Some(file.template_id.clone()),
                    digest: Some(file.digest()),
                    outcome: self.write_file(file, policy),
                },
            };

            match &report_entry.outcome {
                WriteOutcome::Failed { error } => {
                    tracing::warn!("{}: {error}", report_entry.path.display());
                }
                outcome => tracing::debug!("{}: {outcome}", report_entry.path.display()),
            }
            report.push(report_entry);
        }

        report
    }

    fn create_directory(&self, path: &Path) -> WriteOutcome {
        let target = self.root.join(path);
        match self.fs.path_state(&target) {
            Ok(PathState::Directory) => WriteOutcome::skipped("exists"),
            Ok(PathState::File) => WriteOutcome::failed(WriteError::Io {
                message: "a file exists where a directory is planned".into(),
            }),
            Ok(PathState::Missing) => match self.fs.create_dir_all(&target) {
                Ok(()) => WriteOutcome::Created,
                Err(e) => WriteOutcome::failed(e),
            },
            Err(e) => WriteOutcome::failed(e),
        }
    }

    fn write_file(&self, file: &PlannedFile, policy: ConflictPolicy) -> WriteOutcome {
        let target = self.root.join(&file.path);

        // Whatever blocks the parent is an I/O fault, never a conflict on this file.
        if let Some(parent) = target.parent() {
            if let Err(e) = self.fs.create_dir_all(parent) {
                return WriteOutcome::failed(WriteError::Io {
                    message: format!("cannot create {}: {e}", parent.display()),
                });
            }
        }

        let state = match self.fs.path_state(&target) {
            Ok(state) => state,
            Err(e) => return WriteOutcome::failed(e),
        };

        let contents = file.content.as_bytes();
        match (state, policy) {
            (PathState::Missing, _) => match self.fs.write_new(&target, contents) {
                Ok(()) => WriteOutcome::Created,
                Err(e) => WriteOutcome::failed(e),
            },
            (PathState::Directory, _) => WriteOutcome::failed(WriteError::Io {
                message: "a directory exists where a file is planned".into(),
            }),
            (PathState::File, ConflictPolicy::Fail) => {
                WriteOutcome::failed(WriteError::AlreadyExists)
            }
            (PathState::File, ConflictPolicy::Skip) => WriteOutcome::skipped("exists"),
            (PathState::File, ConflictPolicy::Overwrite) => {
                match self.fs.replace(&target, contents) {
                    Ok(()) => WriteOutcome::Overwritten,
                    Err(e) => WriteOutcome::failed(e),
                }
            }
        }
    }
}
