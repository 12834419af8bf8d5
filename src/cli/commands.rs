// ABOUTME: Command implementation for the docrender CLI
// ABOUTME: Loads variables, builds the renderer and pipeline, and runs the render

use anyhow::{anyhow, Context, Result};
use tracing::info;

use super::args::Args;
use super::config::Config;
use crate::pipeline::{Pipeline, RunSummary};
use crate::template::TemplateRenderer;
use crate::variables::VariableStore;

/// Render the template directory into the output directory
pub fn render_documents(args: &Args, config: &Config) -> Result<RunSummary> {
    let directories = args.variable_directories();
    if directories.is_empty() {
        return Err(anyhow!(
            "No variable directories given in '{}'",
            args.variable_dirs
        ));
    }

    let store = VariableStore::with_extensions(&config.render.variable_extensions);
    let variables = store
        .load(&directories)
        .context("Failed to load template variables")?;
    info!("Using {} template variable(s)", variables.len());

    let renderer = TemplateRenderer::with_policy(config.render.undefined);
    let pipeline = Pipeline::new(renderer)
        .with_template_extensions(&config.render.template_extensions)
        .with_failure_policy(config.pipeline.failure_policy);

    let summary = pipeline
        .run(&args.template_dir, &variables, &args.output_dir)
        .with_context(|| {
            format!(
                "Failed to render templates from {}",
                args.template_dir.display()
            )
        })?;

    info!(
        "Render completed: {} rendered, {} copied",
        summary.rendered_count(),
        summary.copied_count()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::UndefinedPolicy;
    use crate::variables::VariableError;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn args(template_dir: &str, variable_dirs: &str, output_dir: &str) -> Args {
        Args::try_parse_from(["docrender", template_dir, variable_dirs, output_dir]).unwrap()
    }

    #[test]
    fn test_render_documents() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("templates")).unwrap();
        fs::create_dir_all(root.join("vars")).unwrap();
        fs::write(root.join("templates/greeting.md"), "Hello, {{ name }}!").unwrap();
        fs::write(root.join("vars/vars.yaml"), "name: John Doe\n").unwrap();

        let args = args(
            root.join("templates").to_str().unwrap(),
            root.join("vars").to_str().unwrap(),
            root.join("out").to_str().unwrap(),
        );
        let summary = render_documents(&args, &Config::default()).unwrap();

        assert_eq!(summary.rendered_count(), 1);
        assert_eq!(
            fs::read_to_string(root.join("out/greeting.md")).unwrap(),
            "Hello, John Doe!"
        );
    }

    #[test]
    fn test_empty_variable_dirs_rejected() {
        let args = args("templates", " ; ", "out");
        assert!(render_documents(&args, &Config::default()).is_err());
    }

    #[test]
    fn test_variable_errors_abort_before_output() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("templates")).unwrap();
        fs::write(root.join("templates/a.md"), "{{x}}").unwrap();

        let args = args(
            root.join("templates").to_str().unwrap(),
            root.join("missing").to_str().unwrap(),
            root.join("out").to_str().unwrap(),
        );
        let err = render_documents(&args, &Config::default()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<VariableError>(),
            Some(VariableError::DirectoryNotFound { .. })
        ));
        assert!(!root.join("out").exists());
    }

    #[test]
    fn test_strict_config_is_honoured() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("templates")).unwrap();
        fs::create_dir_all(root.join("vars")).unwrap();
        fs::write(root.join("templates/a.md"), "{{ undefined_key }}").unwrap();

        let mut config = Config::default();
        config.render.undefined = UndefinedPolicy::Strict;

        let args = args(
            root.join("templates").to_str().unwrap(),
            root.join("vars").to_str().unwrap(),
            root.join("out").to_str().unwrap(),
        );
        assert!(render_documents(&args, &config).is_err());
    }
}
