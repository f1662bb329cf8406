use std::path::{Path, PathBuf};

use anyhow::Result;

use treeforge_core::planner::PlannedEntry;

use crate::output;

/// Print the plan for the given names without writing anything.
pub async fn run(
    config_path: Option<&Path>,
    names: Vec<String>,
    layout: Option<PathBuf>,
    templates: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let scaffolder = super::build_scaffolder(&config, layout, templates)?;
    let names = super::resolve_names(names, &config, scaffolder.layout(), !json)?;

    let plan = scaffolder.plan(&names)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    output::print_header("treeforge plan");
    output::print_key_value("Names", &names.join(", "));
    for entry in plan.entries() {
        match entry {
            PlannedEntry::Directory { path } => println!("  dir   {}/", path.display()),
            PlannedEntry::File(file) => println!(
                "  file  {}  ({}, {} bytes)",
                file.path.display(),
                file.template_id,
                file.content.len()
            ),
        }
    }
    output::print_success(&format!("{} entries planned", plan.len()));

    Ok(())
}
