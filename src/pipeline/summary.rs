// ABOUTME: Run summary types recording what a pipeline run produced
// ABOUTME: Tracks processed files, per-file failures and run timestamps

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    /// Rendered through the template engine
    Rendered,
    /// Copied byte-for-byte
    Copied,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileAction::Rendered => write!(f, "rendered"),
            FileAction::Copied => write!(f, "copied"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedFile {
    /// Path relative to both the template root and the output root
    pub path: PathBuf,
    pub action: FileAction,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
    pub files: Vec<ProcessedFile>,
    pub failures: Vec<FileFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    pub fn start(template_dir: &Path, output_dir: &Path) -> Self {
        Self {
            template_dir: template_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            files: Vec::new(),
            failures: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn record(&mut self, file: ProcessedFile) {
        self.files.push(file);
    }

    pub fn record_failure(&mut self, failure: FileFailure) {
        self.failures.push(failure);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn rendered_count(&self) -> usize {
        self.count(FileAction::Rendered)
    }

    pub fn copied_count(&self) -> usize {
        self.count(FileAction::Copied)
    }

    fn count(&self, action: FileAction) -> usize {
        self.files.iter().filter(|f| f.action == action).count()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processed(path: &str, action: FileAction) -> ProcessedFile {
        ProcessedFile {
            path: PathBuf::from(path),
            action,
            bytes: 10,
        }
    }

    #[test]
    fn test_counts() {
        let mut summary = RunSummary::start(Path::new("templates"), Path::new("out"));
        summary.record(processed("a.md", FileAction::Rendered));
        summary.record(processed("b/c.md", FileAction::Rendered));
        summary.record(processed("logo.png", FileAction::Copied));

        assert_eq!(summary.rendered_count(), 2);
        assert_eq!(summary.copied_count(), 1);
        assert!(!summary.has_failures());
    }

    #[test]
    fn test_finish_sets_duration() {
        let mut summary = RunSummary::start(Path::new("templates"), Path::new("out"));
        assert!(summary.duration().is_none());

        summary.finish();
        let duration = summary.duration().unwrap();
        assert!(duration >= Duration::zero());
    }

    #[test]
    fn test_failure_display() {
        let failure = FileFailure {
            path: PathBuf::from("docs/broken.md"),
            message: "Template syntax error: unexpected".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "docs/broken.md: Template syntax error: unexpected"
        );
    }

    #[test]
    fn test_serializes_actions_lowercase() {
        let json = serde_json::to_value(processed("a.md", FileAction::Copied)).unwrap();
        assert_eq!(json["action"], "copied");
    }
}
