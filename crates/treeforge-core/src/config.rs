//! Project configuration file (`treeforge.config.json`).
//!
//! Every field is optional; command-line flags override whatever the file says.
//! Relative paths inside the file are resolved against the file's own directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScaffoldError};
use crate::installer::InstallConfig;
use crate::layout::LayoutSpec;
use crate::templates::registry::TemplateRegistry;
use crate::writer::ConflictPolicy;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "treeforge.config.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    /// Names for per-name slots.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(default)]
    pub on_conflict: ConflictPolicy,
    /// Layout JSON file; the built-in React layout when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<PathBuf>,
    /// Directory of template files; the embedded templates when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install: Option<InstallConfig>,
}

impl ScaffoldConfig {
    /// Load a config file and resolve its relative paths.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ScaffoldError::ConfigNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        let mut config: Self =
            serde_json::from_str(&contents).map_err(|e| ScaffoldError::ConfigParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        let base = path.parent().unwrap_or(Path::new("."));
        config.layout = config.layout.map(|p| base.join(p));
        config.templates_dir = config.templates_dir.map(|p| base.join(p));
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ScaffoldError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// The configured layout, or the built-in one.
    pub fn load_layout(&self) -> Result<LayoutSpec> {
        match &self.layout {
            Some(path) => LayoutSpec::load(path),
            None => Ok(LayoutSpec::react_app()),
        }
    }

    /// The configured template directory, or the embedded templates.
    pub fn load_registry(&self) -> Result<TemplateRegistry> {
        match &self.templates_dir {
            Some(dir) => TemplateRegistry::from_dir(dir),
            None => Ok(TemplateRegistry::embedded()),
        }
    }
}
