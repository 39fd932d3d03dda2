//! Command-line interface for spinval.
//!
//! Provides:
//! - validate: check a dataset snapshot and exit non-zero when invalid
//! - schema: print the effective schema as JSON

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{print_schema, run, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
