// ABOUTME: Output writer that mirrors relative paths under the output root
// ABOUTME: Writes rendered documents and copies assets, creating directories as needed

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::{PipelineError, Result};

#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the output root if it does not exist yet
    pub fn prepare(&self) -> Result<()> {
        create_dir_all(&self.root)
    }

    /// Destination of a file given its path relative to the template root
    pub fn destination(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    /// Write rendered text, overwriting any existing file. Returns bytes written.
    pub fn write(&self, relative: &Path, content: &str) -> Result<u64> {
        let destination = self.destination(relative);
        self.ensure_parent(&destination)?;

        fs::write(&destination, content).map_err(|source| PipelineError::Write {
            path: destination.clone(),
            source,
        })?;

        debug!(
            "Wrote {} ({} bytes)",
            destination.display(),
            content.len()
        );
        Ok(content.len() as u64)
    }

    /// Copy a file verbatim, overwriting any existing file. Returns bytes copied.
    pub fn copy(&self, source_path: &Path, relative: &Path) -> Result<u64> {
        let destination = self.destination(relative);
        self.ensure_parent(&destination)?;

        let bytes = fs::copy(source_path, &destination).map_err(|source| PipelineError::Write {
            path: destination.clone(),
            source,
        })?;

        debug!("Copied {} to {}", source_path.display(), destination.display());
        Ok(bytes)
    }

    fn ensure_parent(&self, destination: &Path) -> Result<()> {
        match destination.parent() {
            Some(parent) => create_dir_all(parent),
            None => Ok(()),
        }
    }
}

fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| PipelineError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
