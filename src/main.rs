//! The main entry point for the `delog` command-line application.
//!
//! This file is responsible for parsing command-line arguments and handing
//! off to the migration runner in the `delog` library.

use delog::cli;
use delog::errors::Result;
use delog::rewriter;

/// The main function of the application.
///
/// A bare invocation migrates the project in the current working directory
/// with the built-in defaults.
fn main() -> Result<()> {
    let args = cli::parse_args();
    rewriter::run_migrate(args.root, args.config, args.dry_run, args.verbose)
}
