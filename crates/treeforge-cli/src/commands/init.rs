use std::path::{Path, PathBuf};

use anyhow::Result;

use treeforge_core::installer::{CommandInstaller, InstallOutcome, PackageInstaller};

use crate::output;
use crate::ConflictChoice;

/// Scaffold a project tree into `root`.
///
/// Loads the layout and templates, resolves the names, writes the tree under the
/// chosen conflict policy and, when asked, installs dependencies afterwards. Exits
/// with an error if the run was rejected or any entry failed.
#[allow(clippy::too_many_arguments)]
pub async fn run(
    config_path: Option<&Path>,
    root: &Path,
    names: Vec<String>,
    on_conflict: Option<ConflictChoice>,
    layout: Option<PathBuf>,
    templates: Option<PathBuf>,
    json: bool,
    install: bool,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let total = if install { 3 } else { 2 };

    if !json {
        output::print_header(&format!("treeforge init: {}", root.display()));
        output::print_step(1, total, "Loading layout and templates");
    }
    let scaffolder = super::build_scaffolder(&config, layout, templates)?;
    let names = super::resolve_names(names, &config, scaffolder.layout(), !json)?;
    let policy = on_conflict
        .map(ConflictChoice::into_policy)
        .unwrap_or(config.on_conflict);

    if !json {
        output::print_key_value("Names", &names.join(", "));
        output::print_key_value("On conflict", policy.as_str());
        output::print_step(2, total, "Writing project tree");
    }
    let report = scaffolder.run(root, &names, policy);
    let mut document = report.to_json();

    if !json {
        for entry in report.entries() {
            output::print_entry(entry);
        }
    }

    if let Some(error) = report.error() {
        if json {
            print_json(&document)?;
        } else {
            output::print_error(&error.to_string());
        }
        anyhow::bail!("scaffold rejected: {error}");
    }

    let summary = report.summary();
    if !report.success() {
        if json {
            print_json(&document)?;
        } else {
            output::print_error(&summary.to_string());
        }
        anyhow::bail!("scaffold finished with {} failed entries", summary.failed);
    }

    if !json {
        if summary.skipped > 0 {
            output::print_warning(&format!(
                "{} entries already existed and were left untouched",
                summary.skipped
            ));
        }
        output::print_success(&summary.to_string());
    }

    if install {
        let installer = CommandInstaller::new(config.install.clone().unwrap_or_default());
        if !json {
            output::print_step(3, total, &format!("Installing dependencies with {}", installer.name()));
        }

        let outcome = install_dependencies(&installer, root, json).await;
        if json {
            document["install"] = serde_json::to_value(&outcome)?;
            print_json(&document)?;
        }
        match outcome {
            InstallOutcome::Succeeded => {
                if !json {
                    output::print_success("Dependencies installed");
                }
            }
            InstallOutcome::Failed { reason } => {
                if !json {
                    output::print_error(&reason);
                }
                anyhow::bail!("dependency installation failed: {reason}");
            }
        }
    } else if json {
        print_json(&document)?;
    }

    if !json {
        println!();
        println!("  Next steps:");
        println!("    cd {}", root.display());
        if !install {
            println!("    npm install");
        }
        println!("    npm run dev");
        println!();
    }

    Ok(())
}

/// Run the installer, folding missing tools and launch errors into a failed outcome.
async fn install_dependencies(
    installer: &CommandInstaller,
    root: &Path,
    json: bool,
) -> InstallOutcome {
    if let Err(missing) = installer.check_prerequisites() {
        let tools: Vec<String> = missing
            .iter()
            .map(|m| format!("{} ({})", m.tool_name, m.install_instructions))
            .collect();
        if !json {
            for m in &missing {
                output::print_error(&format!(
                    "Missing tool: {}: {}",
                    m.tool_name, m.install_instructions
                ));
            }
        }
        return InstallOutcome::Failed {
            reason: format!("missing prerequisites: {}", tools.join(", ")),
        };
    }

    match installer.install(root).await {
        Ok(outcome) => outcome,
        Err(e) => InstallOutcome::Failed {
            reason: e.to_string(),
        },
    }
}

fn print_json(document: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(document)?);
    Ok(())
}
