//! spinval CLI entry point.
//!
//! A minimal entrypoint that parses arguments and dispatches via
//! `cli::run`, prints the failure to stderr and exits non-zero when a
//! command fails. All logic lives in the library.

use spinval::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
