//! CLI command implementations for treeforge.
//!
//! Each module corresponds to a subcommand (`treeforge <command>`). Helpers shared by
//! `init` and `plan` live here.

pub mod init;
pub mod layout;
pub mod plan;

use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::Input;

use treeforge_core::config::{ScaffoldConfig, CONFIG_FILE};
use treeforge_core::layout::LayoutSpec;
use treeforge_core::scaffold::Scaffolder;

/// Load the config file: an explicit path must exist, the default path is optional.
pub fn load_config(path: Option<&Path>) -> Result<ScaffoldConfig> {
    let config = match path {
        Some(path) => ScaffoldConfig::load(path)?,
        None => ScaffoldConfig::load_or_default(Path::new(CONFIG_FILE))?,
    };
    Ok(config)
}

/// Build a scaffolder from the config, with CLI overrides for layout and templates.
pub fn build_scaffolder(
    config: &ScaffoldConfig,
    layout: Option<PathBuf>,
    templates: Option<PathBuf>,
) -> Result<Scaffolder> {
    let config = ScaffoldConfig {
        layout: layout.or_else(|| config.layout.clone()),
        templates_dir: templates.or_else(|| config.templates_dir.clone()),
        ..config.clone()
    };
    let layout = config.load_layout()?;
    let registry = config.load_registry()?;
    tracing::debug!(
        "layout has {} slots, registry has {} templates",
        layout.slots.len(),
        registry.len()
    );
    Ok(Scaffolder::new(layout, registry))
}

/// Names from the command line, then the config file, then an interactive prompt.
///
/// The prompt only appears when the layout needs names and stdout is a terminal.
pub fn resolve_names(
    args: Vec<String>,
    config: &ScaffoldConfig,
    layout: &LayoutSpec,
    interactive: bool,
) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }
    if !config.names.is_empty() {
        return Ok(config.names.clone());
    }
    if !interactive || !layout.has_per_name_slots() || !console::Term::stdout().is_term() {
        return Ok(Vec::new());
    }

    let answer: String = Input::new()
        .with_prompt("Names to scaffold (comma separated, e.g. dashboard,tasks)")
        .allow_empty(true)
        .interact_text()?;

    Ok(split_names(&answer))
}

fn split_names(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
