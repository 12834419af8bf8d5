// ABOUTME: Configuration management for the docrender application
// ABOUTME: Loads settings from a YAML file, then applies environment and flag overrides

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::Args;
use crate::pipeline::{FailurePolicy, DEFAULT_TEMPLATE_EXTENSIONS};
use crate::template::UndefinedPolicy;
use crate::variables::DEFAULT_VARIABLE_EXTENSIONS;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub undefined: UndefinedPolicy,
    pub template_extensions: Vec<String>,
    pub variable_extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub failure_policy: FailurePolicy,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            undefined: UndefinedPolicy::default(),
            template_extensions: DEFAULT_TEMPLATE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            variable_extensions: DEFAULT_VARIABLE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => {
                return Err(anyhow!("Configuration file not found: {}", p.display()));
            }
            Some(p) => Some(p),
            None => Self::find_config_file(),
        };

        let mut config = match config_path {
            Some(config_path) => Self::from_file(&config_path)?,
            None => Config::default(),
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Parse a configuration file
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::from_yaml(&contents)
            .with_context(|| format!("Invalid configuration file {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let possible_paths = [
            "docrender.yaml",
            "docrender.yml",
            ".docrender.yaml",
            ".docrender.yml",
        ];

        if let Some(path) = possible_paths
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
        {
            return Some(path);
        }

        dirs::home_dir()
            .map(|home| home.join(".docrender").join("config.yaml"))
            .filter(|path| path.exists())
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Merge overrides from an environment-like lookup
    pub fn merge_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("DOCRENDER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("DOCRENDER_LOG_FORMAT") {
            self.logging.format = format;
        }

        if let Some(strict) = lookup("DOCRENDER_STRICT") {
            if parse_flag(&strict)? {
                self.render.undefined = UndefinedPolicy::Strict;
            }
        }

        if let Some(policy) = lookup("DOCRENDER_FAILURE_POLICY") {
            self.pipeline.failure_policy = match policy.trim() {
                "fail-fast" => FailurePolicy::FailFast,
                "collect" => FailurePolicy::Collect,
                other => {
                    return Err(anyhow!(
                        "Invalid DOCRENDER_FAILURE_POLICY '{}'. Expected 'fail-fast' or 'collect'",
                        other
                    ))
                }
            };
        }

        Ok(())
    }

    /// Apply command line flags, which take precedence over file and environment
    pub fn apply_args(&mut self, args: &Args) {
        if args.strict {
            self.render.undefined = UndefinedPolicy::Strict;
        }
        if args.keep_going {
            self.pipeline.failure_policy = FailurePolicy::Collect;
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!(
            "Invalid boolean value '{}' for DOCRENDER_STRICT",
            other
        )),
    }
}
