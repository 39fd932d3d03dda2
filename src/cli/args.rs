//! CLI argument definitions using clap.
//!
//! Commands:
//! - spinval validate <snapshot> [--schema <file>]
//! - spinval schema [--schema <file>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// spinval - validate spin-dynamics simulation datasets
#[derive(Parser, Debug)]
#[command(name = "spinval")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Show only warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a dataset snapshot against the expected layout
    Validate {
        /// Path to the dataset snapshot (JSON container tree)
        path: PathBuf,

        /// Validate against a schema file instead of the built-in layout
        #[arg(long)]
        schema: Option<PathBuf>,
    },

    /// Print the effective schema as JSON
    Schema {
        /// Print a schema file instead of the built-in layout
        #[arg(long)]
        schema: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
