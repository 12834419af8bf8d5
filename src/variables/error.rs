// ABOUTME: Error types for variable loading operations
// ABOUTME: Covers missing variable directories, unreadable files and malformed YAML

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VariableError {
    #[error("Variable directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to parse variables file {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, VariableError>;
