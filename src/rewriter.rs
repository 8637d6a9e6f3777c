use crate::config::{ConfigLoader, MigrateConfig};
use crate::errors::Result;
use crate::rules::{self, RewriteRule};
use crate::{file_set, tag};
use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Core engine for rewriting debug print statements into `Logger` calls.
///
/// A `Rewriter` holds the compiled rule sequence and the logging import
/// line. It processes one file at a time: import insertion first, then the
/// seven substitution rules against the full content, then an unconditional
/// write-back.
pub struct Rewriter {
    rules: Vec<RewriteRule>,
    logger_import: String,
    import_re: Regex,
}

/// Options for processing a file.
pub struct ProcessOptions {
    /// If `true`, changes will be calculated but not written to disk.
    pub dry_run: bool,
}

/// The result of processing a single file.
pub struct ProcessResult {
    /// `true` if the logging import line was inserted.
    pub import_added: bool,
    /// The number of print statements rewritten.
    pub substitutions: usize,
    /// `true` if the content differs from what was read.
    pub modified: bool,
}

impl Rewriter {
    /// Creates a new `Rewriter` from a `MigrateConfig`, compiling the rule
    /// sequence and the generic import-line pattern.
    pub fn new(config: &MigrateConfig) -> Result<Self> {
        Ok(Self {
            rules: rules::rewrite_rules()?,
            logger_import: config.logger_import.clone(),
            import_re: Regex::new(r"import [^;\n]+;\n")?,
        })
    }

    /// Inserts the logging import after the first import line, if needed.
    ///
    /// Returns `None` when the import literal is already present anywhere in
    /// the file, or when the file contains no import statement at all. The
    /// latter intentionally leaves the file without the import rather than
    /// appending one at end-of-file; a file with no imports is left for
    /// manual review.
    fn insert_import(&self, content: &str) -> Option<String> {
        if content.contains(&self.logger_import) {
            return None;
        }

        let first_import = self.import_re.find(content)?;
        let mut out =
            String::with_capacity(content.len() + self.logger_import.len() + 1);
        out.push_str(&content[..first_import.end()]);
        out.push_str(&self.logger_import);
        out.push('\n');
        out.push_str(&content[first_import.end()..]);
        Some(out)
    }

    /// Processes a single file: import insertion, then the rule sequence,
    /// then write-back.
    ///
    /// The file is always rewritten with the (possibly unchanged)
    /// transformed content unless `dry_run` is set. The caller is
    /// responsible for existence checks; a read or write failure here is
    /// fatal to the run.
    pub fn process_file(
        &self,
        path: &Path,
        tag: &str,
        options: &ProcessOptions,
    ) -> Result<ProcessResult> {
        let content = fs::read_to_string(path)?;

        let (content, import_added) = match self.insert_import(&content) {
            Some(with_import) => (with_import, true),
            None => (content, false),
        };

        let (rewritten, substitutions) = rules::apply_rules(&self.rules, &content, tag);

        if !options.dry_run {
            write_atomic(path, &rewritten)?;
        }

        Ok(ProcessResult {
            import_added,
            substitutions,
            modified: import_added || substitutions > 0,
        })
    }
}

/// Writes content over an existing file atomically using a tempfile in the
/// same directory, preserving the original permissions.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| format!("Could not get parent directory for {}", path.display()))?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;

    // Preserve file permissions
    let perms = fs::metadata(path)?.permissions();
    fs::set_permissions(temp_file.path(), perms)?;

    temp_file.persist(path)?;
    Ok(())
}

/// The main entry point for a migration run.
///
/// Loads the configuration (built-in defaults unless a YAML file is given),
/// builds the ordered file set, and processes each file strictly
/// sequentially: one file fully read, rewritten, and closed before the next
/// begins. An I/O failure aborts the run; files already rewritten stay
/// rewritten.
pub fn run_migrate(
    root: PathBuf,
    config_file: Option<PathBuf>,
    dry_run: bool,
    verbose: bool,
) -> Result<()> {
    let config = if let Some(cfg_path) = config_file {
        let resolved = ConfigLoader::find_config(&cfg_path, &root)?;
        println!("Using config file: {}", resolved.display());
        ConfigLoader::load(&resolved)?
    } else {
        MigrateConfig::default()
    };

    let rewriter = Rewriter::new(&config)?;
    let files = file_set::build_file_set(&root, &config)?;
    let options = ProcessOptions { dry_run };

    let mut processed = 0usize;
    let mut imports_added = 0usize;
    let mut files_changed = 0usize;
    let mut total_substitutions = 0usize;

    for path in &files {
        let tag = tag::log_tag(path);
        let result = rewriter.process_file(path, &tag, &options)?;
        processed += 1;

        if result.import_added {
            imports_added += 1;
            if dry_run {
                println!("DRY Would add Logger import to {}", path.display());
            } else {
                println!("Added Logger import to {}", path.display());
            }
        }

        if result.modified {
            files_changed += 1;
        }
        total_substitutions += result.substitutions;

        if dry_run {
            println!(
                "DRY Would replace print statements in {} ({} substitutions)",
                path.display(),
                result.substitutions
            );
        } else if verbose {
            println!(
                "Replaced print statements in {} ({} substitutions)",
                path.display(),
                result.substitutions
            );
        } else {
            println!("Replaced print statements in {}", path.display());
        }
    }

    println!("\n{}", "-".repeat(50));
    println!("Files processed : {processed}");
    println!("Imports added   : {imports_added}");
    println!("Files changed   : {files_changed}");
    println!("Prints rewritten: {total_substitutions}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn test_rewriter() -> Rewriter {
        Rewriter::new(&MigrateConfig::default()).unwrap()
    }

    const LOGGER_IMPORT: &str = "import 'package:yetuga/utils/logger.dart';";

    #[test]
    fn test_import_inserted_after_first_import_line() {
        let rewriter = test_rewriter();
        let src = "import 'package:flutter/material.dart';\nimport 'dart:async';\n\nvoid main() {}\n";

        let out = rewriter.insert_import(src).unwrap();
        assert_eq!(
            out,
            format!(
                "import 'package:flutter/material.dart';\n{LOGGER_IMPORT}\nimport 'dart:async';\n\nvoid main() {{}}\n"
            )
        );
    }

    #[test]
    fn test_import_insertion_is_noop_when_already_present() {
        let rewriter = test_rewriter();
        let src = format!("import 'dart:async';\n{LOGGER_IMPORT}\n\nvoid main() {{}}\n");
        assert!(rewriter.insert_import(&src).is_none());
    }

    #[test]
    fn test_no_import_statement_leaves_file_unmodified() {
        let rewriter = test_rewriter();
        // No import anywhere: the step is a no-op, nothing is appended.
        assert!(rewriter.insert_import("void main() {}\n").is_none());
    }

    #[test]
    fn test_process_file_rewrites_prints_and_adds_import() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("auth_provider.dart");
        fs::write(
            &path,
            "import 'dart:async';\n\nvoid signIn() {\n  print('DEBUG: signing in');\n  print('DEBUG: Error in signIn: $e');\n}\n",
        )
        .unwrap();

        let rewriter = test_rewriter();
        let result = rewriter
            .process_file(&path, "AuthProvider", &ProcessOptions { dry_run: false })
            .unwrap();

        assert!(result.import_added);
        assert_eq!(result.substitutions, 2);
        assert!(result.modified);

        let out = fs::read_to_string(&path).unwrap();
        assert!(out.contains(LOGGER_IMPORT));
        assert!(out.contains("Logger.d('AuthProvider', 'signing in');"));
        assert!(out.contains("Logger.e('AuthProvider', 'Error in signIn', e);"));
        assert!(!out.contains("print("));
    }

    #[test]
    fn test_process_file_without_matches_preserves_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("clean.dart");
        let src = format!("import 'dart:async';\n{LOGGER_IMPORT}\n\nvoid main() {{}}\n");
        fs::write(&path, &src).unwrap();

        let rewriter = test_rewriter();
        let result = rewriter
            .process_file(&path, "Clean", &ProcessOptions { dry_run: false })
            .unwrap();

        assert!(!result.modified);
        assert_eq!(fs::read_to_string(&path).unwrap(), src);
    }

    #[test]
    fn test_dry_run_does_not_touch_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("screen.dart");
        let src = "import 'dart:async';\n\nvoid f() {\n  print('DEBUG: hi');\n}\n";
        fs::write(&path, src).unwrap();

        let rewriter = test_rewriter();
        let result = rewriter
            .process_file(&path, "Screen", &ProcessOptions { dry_run: true })
            .unwrap();

        assert!(result.modified);
        assert_eq!(result.substitutions, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), src);
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage_service.dart");
        fs::write(
            &path,
            "import 'dart:io';\n\nvoid save() {\n  print('DEBUG: saving: $path');\n  print(\"Save Error: $e\");\n}\n",
        )
        .unwrap();

        let rewriter = test_rewriter();
        let options = ProcessOptions { dry_run: false };
        rewriter
            .process_file(&path, "StorageService", &options)
            .unwrap();
        let migrated = fs::read_to_string(&path).unwrap();

        let result = rewriter
            .process_file(&path, "StorageService", &options)
            .unwrap();
        assert!(!result.modified);
        assert_eq!(fs::read_to_string(&path).unwrap(), migrated);
    }

    #[test]
    fn test_run_migrate_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let lib = root.join("lib");
        fs::create_dir_all(lib.join("utils")).unwrap();

        // Priority list names a file that does not exist; the run must skip
        // it and still process the rest.
        fs::write(
            root.join("migrate.yaml"),
            "priority_files:\n  - lib/missing.dart\n  - lib/main.dart\n",
        )
        .unwrap();

        fs::write(
            lib.join("main.dart"),
            "import 'dart:async';\n\nvoid main() {\n  print('DEBUG: booting');\n}\n",
        )
        .unwrap();
        fs::write(
            lib.join("onboarding_screen.dart"),
            "import 'dart:async';\n\nvoid show() {\n  print('DEBUG: Error in show: $e');\n}\n",
        )
        .unwrap();
        let logger_src = "class Logger {\n  static void d(String tag, String msg) {}\n}\n";
        fs::write(lib.join("utils/logger.dart"), logger_src).unwrap();

        run_migrate(
            root.to_path_buf(),
            Some(PathBuf::from("migrate.yaml")),
            false,
            false,
        )
        .unwrap();

        let main_out = fs::read_to_string(lib.join("main.dart")).unwrap();
        assert!(main_out.contains("import 'package:yetuga/utils/logger.dart';"));
        assert!(main_out.contains("Logger.d('Main', 'booting');"));

        // Tag comes from the file name, per file.
        let screen_out = fs::read_to_string(lib.join("onboarding_screen.dart")).unwrap();
        assert!(screen_out.contains("Logger.e('OnboardingScreen', 'Error in show', e);"));

        // The logger's own file is never rewritten.
        assert_eq!(
            fs::read_to_string(lib.join("utils/logger.dart")).unwrap(),
            logger_src
        );
    }
}
