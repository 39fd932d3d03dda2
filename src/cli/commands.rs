//! CLI command implementations.
//!
//! `validate` loads a container snapshot, runs the validator, reports every
//! finding through the logger grouped by severity, and fails the process
//! when the dataset is invalid. `schema` prints the effective schema as
//! JSON so the expected layout can be inspected or forked into a custom
//! schema file.

use std::path::Path;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::container::MemoryContainer;
use crate::schema::{uppasd_schema, SchemaRegistry};
use crate::validate::{Severity, ValidationReport, Validator};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parses arguments, initializes logging and dispatches the command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Validate { path, schema } => validate(&path, schema.as_deref()),
        Command::Schema { schema } => print_schema(schema.as_deref()),
    }
}

/// Initializes the fmt subscriber from the verbosity flags, letting an
/// explicit `RUST_LOG` override them.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spinval={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Loads the effective schema: a file when given, the built-in otherwise.
fn load_registry(schema: Option<&Path>) -> CliResult<SchemaRegistry> {
    match schema {
        Some(path) => Ok(SchemaRegistry::from_file(path)?),
        None => Ok(uppasd_schema()?),
    }
}

/// Runs validation and reports the outcome.
pub fn validate(path: &Path, schema: Option<&Path>) -> CliResult<()> {
    let registry = load_registry(schema)?;
    info!(
        "validating '{}' against schema '{}'",
        path.display(),
        registry.name()
    );

    let container = MemoryContainer::from_snapshot(path)?;
    let report = Validator::new(&registry).validate(&container)?;

    report_findings(&report);

    let errors = report.error_count();
    let warnings = report.warning_count();
    if report.is_valid() {
        info!(
            "dataset '{}' is valid ({} warning(s), {} quantit{} extracted)",
            path.display(),
            warnings,
            report.quantities().len(),
            if report.quantities().len() == 1 { "y" } else { "ies" }
        );
        Ok(())
    } else {
        error!(
            "dataset '{}' is invalid: {} error(s), {} warning(s)",
            path.display(),
            errors,
            warnings
        );
        Err(CliError::dataset_invalid(errors, warnings))
    }
}

/// Logs every finding, errors first, each group in traversal order.
fn report_findings(report: &ValidationReport) {
    for finding in report.findings_with_severity(Severity::Error) {
        error!("[{}] {}: {}", finding.code(), finding.path(), finding.message());
    }
    for finding in report.findings_with_severity(Severity::Warning) {
        warn!("[{}] {}: {}", finding.code(), finding.path(), finding.message());
    }
}

/// Prints the effective schema as pretty JSON on stdout.
pub fn print_schema(schema: Option<&Path>) -> CliResult<()> {
    let registry = load_registry(schema)?;
    let json = serde_json::to_string_pretty(&registry)
        .map_err(|e| CliError::output_error(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
