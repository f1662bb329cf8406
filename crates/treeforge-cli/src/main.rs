//! treeforge CLI — scaffold project source trees from declarative layouts.
//!
//! Provides three commands: `init` writes a project tree, `plan` shows what `init`
//! would write, and `layout` emits the built-in layout as a starting point.
//!
//! All of the work happens in [`treeforge_core`]; this crate handles arguments,
//! configuration lookup and terminal output.

mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use treeforge_core::writer::ConflictPolicy;

#[derive(Parser)]
#[command(
    name = "treeforge",
    about = "Scaffold project source trees from layouts, templates and names",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to treeforge.config.json (default: ./treeforge.config.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a project tree into a directory
    Init {
        /// Project root (created if missing)
        root: PathBuf,

        /// Names for per-name slots, e.g. page names
        names: Vec<String>,

        /// What to do with files that already exist
        #[arg(long, value_enum)]
        on_conflict: Option<ConflictChoice>,

        /// Layout JSON file (default: built-in React layout)
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Directory of template files (default: embedded templates)
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Install dependencies after a successful scaffold
        #[arg(long)]
        install: bool,
    },

    /// Show the files and directories `init` would create
    Plan {
        /// Names for per-name slots
        names: Vec<String>,

        /// Layout JSON file (default: built-in React layout)
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Directory of template files (default: embedded templates)
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Emit the built-in layout as JSON
    Layout {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum ConflictChoice {
    Fail,
    Skip,
    Overwrite,
}

impl ConflictChoice {
    pub fn into_policy(self) -> ConflictPolicy {
        match self {
            Self::Fail => ConflictPolicy::Fail,
            Self::Skip => ConflictPolicy::Skip,
            Self::Overwrite => ConflictPolicy::Overwrite,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init {
            root,
            names,
            on_conflict,
            layout,
            templates,
            json,
            install,
        } => {
            commands::init::run(
                cli.config.as_deref(),
                &root,
                names,
                on_conflict,
                layout,
                templates,
                json,
                install,
            )
            .await?;
        }
        Commands::Plan {
            names,
            layout,
            templates,
            json,
        } => {
            commands::plan::run(cli.config.as_deref(), names, layout, templates, json).await?;
        }
        Commands::Layout { output } => {
            commands::layout::run(output.as_deref()).await?;
        }
    }

    Ok(())
}
