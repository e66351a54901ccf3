//! Input discovery using the `ignore` crate.
//!
//! Only files directly inside the input directory are considered; hidden
//! files are skipped and `.gitignore` rules are not applied.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::error::{GraphError, Result};

/// Default extension of source files.
pub const DEFAULT_EXTENSION: &str = "csv";

/// List the source files in `dir` whose extension matches `extension`.
///
/// Extension matching ignores ASCII case and an optional leading dot.
/// The result is sorted by path. A `dir` that does not exist has no sources;
/// a path that exists but is not a directory is an error.
pub fn discover_sources(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        tracing::warn!(dir = %dir.display(), "Input directory does not exist");
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(GraphError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let wanted = extension.trim_start_matches('.');

    let mut builder = WalkBuilder::new(dir);
    builder
        .standard_filters(false)
        .hidden(true) // Skip dotfiles
        .follow_links(true)
        .max_depth(Some(1));

    let mut sources = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|e| GraphError::Scan {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(wanted))
            .unwrap_or(false);

        if matches {
            sources.push(entry.into_path());
        }
    }

    sources.sort();
    tracing::debug!(dir = %dir.display(), count = sources.len(), "Discovered sources");
    Ok(sources)
}
