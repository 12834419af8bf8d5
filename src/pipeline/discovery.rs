// ABOUTME: Template discovery by recursive directory traversal
// ABOUTME: Yields regular files in lexical path order with paths relative to the template root

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::error::{PipelineError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub absolute: PathBuf,
    pub relative: PathBuf,
}

/// Collect every regular file under `root`, skipping the `exclude` directory if it lies inside.
///
/// Symbolic links are followed and mirrored under their own name. A link cycle is a walk error.
pub fn discover(root: &Path, exclude: Option<&Path>) -> Result<Vec<SourceFile>> {
    let exclude = exclude.and_then(|dir| dir.canonicalize().ok());

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, exclude.as_deref()));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| PipelineError::OutsideRoot {
                path: entry.path().to_path_buf(),
            })?
            .to_path_buf();

        files.push(SourceFile {
            absolute: entry.path().to_path_buf(),
            relative,
        });
    }

    debug!("Discovered {} file(s) under {}", files.len(), root.display());
    Ok(files)
}

fn is_excluded(entry: &DirEntry, exclude: Option<&Path>) -> bool {
    let Some(exclude) = exclude else {
        return false;
    };
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    entry
        .path()
        .canonicalize()
        .map(|path| path == exclude)
        .unwrap_or(false)
}

/// Whether `path` carries one of `extensions`. An empty list matches every file.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
