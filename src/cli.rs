use clap::Parser;
use std::path::PathBuf;

/// A one-shot migrator of Dart debug print statements to Logger calls.
///
/// `delog` walks a Flutter-style project, rewrites `print('DEBUG: ...')`
/// statements into structured `Logger.d` / `Logger.e` calls tagged with the
/// originating file's name, and inserts the logging import where missing.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Migrate debug print statements to structured Logger calls",
    long_about = "delog - one-shot migration of Dart debug prints to Logger calls.

Rewrites print('DEBUG: ...') statements into Logger.d / Logger.e calls,
tagged with the PascalCase name of the originating file, and inserts the
logging import after the first existing import line where missing.

Files are processed in two passes: an explicit priority list first, then
every remaining source file discovered under the source root. The logging
module's own file is never touched.

QUICK EXAMPLES:
  delog                      # Migrate the project in the current directory
  delog path/to/project      # Migrate another project root
  delog --dry-run            # Preview rewrites without modifying files
  delog -c migrate.yaml .    # Use a custom migration config"
)]
pub struct Args {
    /// The project root to migrate.
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Path to a YAML migration config overriding the built-in defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Preview the rewrites without modifying any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Print per-file substitution counts.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}
