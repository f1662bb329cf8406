//! Per-entry outcomes and the aggregated run report.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PlanError, WriteError};

/// What happened to one planned entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WriteOutcome {
    Created,
    Skipped { reason: String },
    Overwritten,
    Failed { error: WriteError },
}

impl WriteOutcome {
    pub fn skipped(reason: &str) -> Self {
        Self::Skipped {
            reason: reason.to_string(),
        }
    }

    pub fn failed(error: impl Into<WriteError>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => f.write_str("created"),
            Self::Skipped { reason } => write!(f, "skipped ({reason})"),
            Self::Overwritten => f.write_str("overwritten"),
            Self::Failed { error } => write!(f, "failed: {error}"),
        }
    }
}

/// Whether a report entry is a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Directory,
    File,
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// Root-relative path.
    pub path: PathBuf,
    pub entry: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// SHA-256 of the planned content, for files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(flatten)]
    pub outcome: WriteOutcome,
}

/// Counts per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub created: usize,
    pub skipped: usize,
    pub overwritten: usize,
    pub failed: usize,
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} skipped, {} overwritten, {} failed",
            self.created, self.skipped, self.overwritten, self.failed
        )
    }
}

/// The result of one scaffold run, in plan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    root: PathBuf,
    entries: Vec<ReportEntry>,
    /// Set when validation or planning aborted the run; `entries` is then empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<PlanError>,
}

impl ScaffoldReport {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            entries: Vec::new(),
            error: None,
        }
    }

    /// An empty report for a run rejected before any write.
    pub fn aborted(root: &Path, error: PlanError) -> Self {
        Self {
            error: Some(error),
            ..Self::new(root)
        }
    }

    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn error(&self) -> Option<&PlanError> {
        self.error.as_ref()
    }

    /// True when the run was not aborted and no entry failed.
    ///
    /// Skipped entries do not count as failures; see [`Self::skipped`].
    pub fn success(&self) -> bool {
        self.error.is_none() && !self.entries.iter().any(|e| e.outcome.is_failure())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, WriteOutcome::Skipped { .. }))
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.outcome.is_failure())
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary::default();
        for entry in &self.entries {
            match entry.outcome {
                WriteOutcome::Created => summary.created += 1,
                WriteOutcome::Skipped { .. } => summary.skipped += 1,
                WriteOutcome::Overwritten => summary.overwritten += 1,
                WriteOutcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }

    /// Machine-readable form: the report plus `success` and `summary`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "success": self.success(),
            "summary": self.summary(),
            "root": self.root,
            "entries": self.entries,
            "error": self.error,
        })
    }
}
