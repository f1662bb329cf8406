use std::path::Path;

use anyhow::Result;

use treeforge_core::layout::LayoutSpec;

use crate::output;

/// Emit the built-in layout as JSON, to stdout or to `output_path`.
///
/// The written file is a starting point for a custom `--layout`.
pub async fn run(output_path: Option<&Path>) -> Result<()> {
    let layout = LayoutSpec::react_app();

    match output_path {
        Some(path) => {
            if path.exists() {
                anyhow::bail!("refusing to overwrite existing file: {}", path.display());
            }
            layout.save(path)?;
            output::print_success(&format!("Default layout written to {}", path.display()));
        }
        None => println!("{}", serde_json::to_string_pretty(&layout)?),
    }

    Ok(())
}
