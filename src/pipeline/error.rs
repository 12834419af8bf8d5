// ABOUTME: Error types for pipeline driver operations
// ABOUTME: Covers missing template roots, traversal, per-file read/render/write failures

use std::path::PathBuf;
use thiserror::Error;

use super::summary::FileFailure;
use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Template directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to traverse template directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Path {} is outside the template directory", path.display())]
    OutsideRoot { path: PathBuf },

    #[error("Failed to read template {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to render template {}: {source}", path.display())]
    Template {
        path: PathBuf,
        source: TemplateError,
    },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} file(s) failed: {}", .0.len(), format_failures(.0))]
    Failures(Vec<FileFailure>),
}

fn format_failures(failures: &[FileFailure]) -> String {
    failures
        .iter()
        .map(|failure| failure.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, PipelineError>;
