use crate::config::MigrateConfig;
use crate::errors::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Builds the ordered, deduplicated sequence of files to process.
///
/// Priority-list entries come first, in listed order, each gated on
/// existence (a missing entry is skipped silently, not an error). The
/// source root is then walked recursively; discovered files keep traversal
/// order, unsorted. The logger's own file and anything already named in the
/// priority list are excluded from discovery, so no file is processed twice.
pub fn build_file_set(root: &Path, config: &MigrateConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for rel in &config.priority_files {
        let path = root.join(rel);
        if path.is_file() {
            files.push(path);
        }
    }

    let source_root = root.join(&config.source_root);
    if !source_root.is_dir() {
        return Ok(files);
    }

    let logger_file = Path::new(&config.logger_file);
    let mut walker = WalkBuilder::new(&source_root);
    walker.standard_filters(true); // Respect .gitignore

    for entry in walker.build() {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !has_extension(path, &config.extension) {
            continue;
        }

        // Skip rules match on the root-relative path, as the priority list
        // and logger file are written relative to the project root.
        let rel = path.strip_prefix(root).unwrap_or(path);
        if rel == logger_file {
            continue;
        }
        if config.priority_files.iter().any(|p| Path::new(p) == rel) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|os| os.to_str()) == Some(extension)
}
