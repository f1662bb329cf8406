//! Unified error types for the treeforge engine.
//!
//! Errors come in two tiers:
//! - [`PlanError`] — problems with the layout, the names or a template. These are
//!   detected before anything touches the disk and always abort the whole run.
//! - [`WriteError`] — per-file conditions hit while writing. They are recorded in
//!   the [`ScaffoldReport`](crate::report::ScaffoldReport) and never stop sibling writes.
//!
//! [`ScaffoldError`] covers everything around the engine: config files, template
//! directories, the installer, plain I/O.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// A layout, name or template problem found during validation or planning.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanError {
    // --- Names ---

    /// The identifier is empty or not of the form `[A-Za-z][A-Za-z0-9]*`.
    #[error("invalid name '{name}' (expected a letter followed by letters or digits)")]
    InvalidName { name: String },

    /// The same identifier was supplied twice.
    #[error("duplicate name '{name}'")]
    DuplicateName { name: String },

    // --- Templates ---

    /// A placeholder references a role that has no binding.
    #[error("unbound placeholder role '{role}'")]
    UnboundPlaceholder { role: String },

    /// A placeholder names a casing that does not exist.
    #[error("unknown casing '{casing}' (supported: raw, lower, pascal, camel, kebab)")]
    UnknownCasing { casing: String },

    /// `{{` was not followed by a well-formed `role:casing}}`.
    #[error("malformed placeholder at byte {offset}: {reason}")]
    MalformedPlaceholder { offset: usize, reason: String },

    /// A slot refers to a template id missing from the registry.
    #[error("unknown template '{id}'")]
    UnknownTemplate { id: String },

    // --- Layout ---

    /// Two planned entries resolve to the same path.
    #[error("path collision at {path}: produced by both '{first}' and '{second}'")]
    PathCollision {
        path: PathBuf,
        first: String,
        second: String,
    },

    /// A resolved path would escape the project root or is empty.
    #[error("unsafe path '{path}' (must be relative and stay inside the project root)")]
    UnsafePath { path: String },

    /// The layout itself is inconsistent.
    #[error("invalid layout: {reason}")]
    InvalidLayout { reason: String },
}

/// A per-entry failure recorded in the report.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WriteError {
    /// The target file exists and the conflict policy is `fail`.
    #[error("already exists")]
    AlreadyExists,

    /// The filesystem refused the operation.
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for WriteError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            Self::AlreadyExists
        } else {
            Self::Io {
                message: e.to_string(),
            }
        }
    }
}

/// All errors that can occur around a treeforge run.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    // --- Configuration ---

    /// A config or layout file was not found.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config or layout file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A template directory could not be read.
    #[error("failed to load templates from {path}")]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Installation ---

    /// The package manager used by the installer is not on `PATH`.
    #[error("required tool '{name}' not found — install: {install}")]
    MissingTool { name: String, install: String },

    /// The package manager could not be started or timed out.
    #[error("dependency installation failed: {0}")]
    InstallFailed(String),

    // --- Engine ---

    /// Validation or planning rejected the input.
    #[error(transparent)]
    Plan(#[from] PlanError),

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, ScaffoldError>`.
pub type Result<T> = std::result::Result<T, ScaffoldError>;
