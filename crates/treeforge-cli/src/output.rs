//! Terminal output formatting for the treeforge CLI.
//!
//! Provides consistent, colored output using the [`console`] crate.

use console::style;

use treeforge_core::report::{ReportEntry, WriteOutcome};

/// Print a bold cyan header with an underline separator.
pub fn print_header(text: &str) {
    println!("\n{}", style(text).bold().cyan());
    println!("{}", style("=".repeat(text.len())).dim());
}

/// Print a success message prefixed with green `[OK]`.
pub fn print_success(text: &str) {
    println!("{} {}", style("[OK]").green().bold(), text);
}

/// Print a warning message prefixed with yellow `[WARN]`.
pub fn print_warning(text: &str) {
    println!("{} {}", style("[WARN]").yellow().bold(), text);
}

/// Print an error message prefixed with red `[ERROR]`.
pub fn print_error(text: &str) {
    println!("{} {}", style("[ERROR]").red().bold(), text);
}

/// Print a progress step indicator like `[1/3] Writing project tree...`.
pub fn print_step(step: u32, total: u32, text: &str) {
    println!("{} {}", style(format!("[{step}/{total}]")).dim(), text);
}

/// Print a key-value pair with dimmed key formatting.
pub fn print_key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Print one report line, colored by outcome.
pub fn print_entry(entry: &ReportEntry) {
    let path = entry.path.display();
    let tag = match &entry.outcome {
        WriteOutcome::Created => style("created").green(),
        WriteOutcome::Overwritten => style("overwritten").yellow(),
        WriteOutcome::Skipped { .. } => style("skipped").dim(),
        WriteOutcome::Failed { .. } => style("failed").red().bold(),
    };
    match &entry.outcome {
        WriteOutcome::Skipped { reason } => println!("  {tag} {path} ({reason})"),
        WriteOutcome::Failed { error } => println!("  {tag} {path}: {error}"),
        _ => println!("  {tag} {path}"),
    }
}
