// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Builds scratch template, variable and output trees and snapshots them

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn template_dir(&self) -> PathBuf {
        self.root().join("templates")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("output")
    }

    pub fn variable_dir(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write a template file relative to the template directory
    pub fn write_template(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.template_dir().join(relative), content.as_bytes())
    }

    /// Write raw bytes relative to the template directory
    pub fn write_asset(&self, relative: &str, bytes: &[u8]) -> PathBuf {
        write_file(&self.template_dir().join(relative), bytes)
    }

    /// Write a variables file into the named variable directory
    pub fn write_variables(&self, dir: &str, file: &str, content: &str) -> PathBuf {
        write_file(&self.variable_dir(dir).join(file), content.as_bytes())
    }

    pub fn read_output(&self, relative: &str) -> String {
        fs::read_to_string(self.output_dir().join(relative))
            .unwrap_or_else(|e| panic!("Failed to read output {}: {}", relative, e))
    }

    /// `dir1;dir2` style argument for the given variable directories
    pub fn variable_arg(&self, names: &[&str]) -> String {
        names
            .iter()
            .map(|name| self.variable_dir(name).display().to_string())
            .collect::<Vec<_>>()
            .join(";")
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, bytes).expect("Failed to write test file");
    path.to_path_buf()
}

/// Snapshot every file under `root` keyed by relative path
pub fn read_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            let bytes = fs::read(entry.path()).unwrap();
            (relative, bytes)
        })
        .collect()
}

/// Relative paths of every file under `root`
pub fn relative_files(root: &Path) -> Vec<PathBuf> {
    read_tree(root).into_keys().collect()
}
