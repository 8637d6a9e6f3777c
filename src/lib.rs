//! `delog` is a library for one-shot, regex-driven migration of Dart debug
//! print statements to structured `Logger` calls.
//!
//! It provides the core logic for the `delog` command-line tool but can also
//! be used as a standalone library. The main components are:
//!
//! - `Rewriter`: applies the ordered rewrite-rule sequence to a file and
//!   inserts the logging import where missing.
//! - `rules`: the seven print-call shapes and their replacement builders.
//! - `tag`: derives the PascalCase log tag from a file's base name.
//! - `file_set`: builds the ordered list of files to process - a fixed
//!   priority list followed by directory discovery.
//! - `config`: built-in defaults and YAML overrides for the migration.
//!
//! The tool is deliberately sequential: one file is fully read, rewritten,
//! and closed before the next begins, and any I/O failure aborts the run.

pub mod cli;
pub mod config;
pub mod errors;
pub mod file_set;
pub mod rewriter;
pub mod rules;
pub mod tag;

// Re-export main types for easier access by library users.
pub use config::MigrateConfig;
pub use errors::{Error, Result};
pub use rewriter::Rewriter;
