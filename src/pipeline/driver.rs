// ABOUTME: Pipeline driver that renders a template tree into an output tree
// ABOUTME: Applies the failure policy and records every processed file in a RunSummary

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use super::discovery::{self, SourceFile};
use super::error::{PipelineError, Result};
use super::summary::{FileAction, FileFailure, ProcessedFile, RunSummary};
use super::writer::OutputWriter;
use crate::template::TemplateRenderer;
use crate::variables::VariableMapping;

pub const DEFAULT_TEMPLATE_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// How the driver reacts to a file that fails to render or write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Abort the run on the first failure
    #[default]
    FailFast,
    /// Process every file, then report all failures together
    Collect,
}

pub struct Pipeline {
    renderer: TemplateRenderer,
    template_extensions: Vec<String>,
    failure_policy: FailurePolicy,
}

impl Pipeline {
    pub fn new(renderer: TemplateRenderer) -> Self {
        Self {
            renderer,
            template_extensions: DEFAULT_TEMPLATE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Extensions rendered as templates; other files are copied. Empty renders everything.
    pub fn with_template_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.template_extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    pub fn is_template(&self, path: &Path) -> bool {
        discovery::has_extension(path, &self.template_extensions)
    }

    /// Render every file under `template_dir` into the same relative path under `output_dir`
    pub fn run(
        &self,
        template_dir: &Path,
        variables: &VariableMapping,
        output_dir: &Path,
    ) -> Result<RunSummary> {
        if !template_dir.is_dir() {
            return Err(PipelineError::DirectoryNotFound {
                path: template_dir.to_path_buf(),
            });
        }

        info!(
            "Rendering {} into {}",
            template_dir.display(),
            output_dir.display()
        );

        let files = discovery::discover(template_dir, Some(output_dir))?;
        let writer = OutputWriter::new(output_dir);
        writer.prepare()?;

        let mut summary = RunSummary::start(template_dir, output_dir);

        for file in &files {
            match self.process(file, variables, &writer) {
                Ok(processed) => summary.record(processed),
                Err(e) => match self.failure_policy {
                    FailurePolicy::FailFast => return Err(e),
                    FailurePolicy::Collect => {
                        error!("{}", e);
                        summary.record_failure(FileFailure {
                            path: file.relative.clone(),
                            message: e.to_string(),
                        });
                    }
                },
            }
        }

        summary.finish();

        if summary.has_failures() {
            return Err(PipelineError::Failures(summary.failures));
        }

        debug!(
            "Run finished: {} rendered, {} copied in {}ms",
            summary.rendered_count(),
            summary.copied_count(),
            summary
                .duration()
                .map(|d| d.num_milliseconds())
                .unwrap_or_default()
        );

        Ok(summary)
    }

    fn process(
        &self,
        file: &SourceFile,
        variables: &VariableMapping,
        writer: &OutputWriter,
    ) -> Result<ProcessedFile> {
        if !self.is_template(&file.relative) {
            let bytes = writer.copy(&file.absolute, &file.relative)?;
            info!("Copied {}", file.relative.display());
            return Ok(ProcessedFile {
                path: file.relative.clone(),
                action: FileAction::Copied,
                bytes,
            });
        }

        let template_text =
            fs::read_to_string(&file.absolute).map_err(|source| PipelineError::Read {
                path: file.absolute.clone(),
                source,
            })?;

        let rendered = self
            .renderer
            .render(&template_text, variables)
            .map_err(|source| PipelineError::Template {
                path: file.absolute.clone(),
                source,
            })?;

        let bytes = writer.write(&file.relative, &rendered)?;
        info!("Rendered {}", file.relative.display());

        Ok(ProcessedFile {
            path: file.relative.clone(),
            action: FileAction::Rendered,
            bytes,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(TemplateRenderer::default())
    }
}
