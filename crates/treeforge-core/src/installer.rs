//! Dependency installation after a successful scaffold.
//!
//! The engine does not care what the package manager does, only whether it ran and
//! succeeded. [`CommandInstaller`] runs a configured program (`npm install` by
//! default) inside the project root with a timeout.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScaffoldError};

/// Which command to run and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    600
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            program: "npm".into(),
            args: vec!["install".into()],
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Information about a missing prerequisite tool.
#[derive(Debug, Clone)]
pub struct PrerequisiteError {
    pub tool_name: String,
    pub install_instructions: String,
}

/// Result of an installation attempt that actually ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InstallOutcome {
    Succeeded,
    Failed { reason: String },
}

/// Something that installs a scaffolded project's dependencies.
#[async_trait]
pub trait PackageInstaller: Send + Sync {
    /// Human-readable name for output.
    fn name(&self) -> &str;

    /// Check that the tools this installer needs are on `PATH`.
    fn check_prerequisites(&self) -> std::result::Result<(), Vec<PrerequisiteError>>;

    /// Install dependencies for the project at `root`.
    async fn install(&self, root: &Path) -> Result<InstallOutcome>;
}

/// Runs an external package manager as a child process.
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    config: InstallConfig,
}

impl CommandInstaller {
    pub fn new(config: InstallConfig) -> Self {
        Self { config }
    }
}

impl Default for CommandInstaller {
    fn default() -> Self {
        Self::new(InstallConfig::default())
    }
}

#[async_trait]
impl PackageInstaller for CommandInstaller {
    fn name(&self) -> &str {
        &self.config.program
    }

    fn check_prerequisites(&self) -> std::result::Result<(), Vec<PrerequisiteError>> {
        if which::which(&self.config.program).is_err() {
            return Err(vec![PrerequisiteError {
                tool_name: self.config.program.clone(),
                install_instructions: match self.config.program.as_str() {
                    "npm" | "npx" => "https://nodejs.org/".into(),
                    "yarn" => "npm install -g yarn".into(),
                    "pnpm" => "npm install -g pnpm".into(),
                    other => format!("install '{other}' and make sure it is on PATH"),
                },
            }]);
        }
        Ok(())
    }

    async fn install(&self, root: &Path) -> Result<InstallOutcome> {
        let program = &self.config.program;
        tracing::info!(
            "running {program} {} in {}",
            self.config.args.join(" "),
            root.display()
        );

        let child = tokio::process::Command::new(program)
            .args(&self.config.args)
            .current_dir(root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ScaffoldError::MissingTool {
                    name: program.clone(),
                    install: format!("make sure '{program}' is on PATH"),
                },
                _ => ScaffoldError::InstallFailed(format!("could not start {program}: {e}")),
            })?;

        let timeout = Duration::from_secs(self.config.timeout_secs);
        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                ScaffoldError::InstallFailed(format!(
                    "{program} did not finish within {}s",
                    self.config.timeout_secs
                ))
            })??;

        if output.status.success() {
            return Ok(InstallOutcome::Succeeded);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::debug!("{program} stderr: {stderr}");
        Ok(InstallOutcome::Failed {
            reason: match output.status.code() {
                Some(code) => format!("{program} exited with status {code}"),
                None => format!("{program} was terminated by a signal"),
            },
        })
    }
}
