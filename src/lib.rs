// ABOUTME: Main library module for the docrender template renderer
// ABOUTME: Exports the variable store, template renderer, pipeline driver and CLI

pub mod cli;
pub mod pipeline;
pub mod template;
pub mod variables;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use pipeline::{FailurePolicy, Pipeline, PipelineError, RunSummary};
pub use template::{TemplateError, TemplateRenderer, UndefinedPolicy};
pub use variables::{split_directories, VariableError, VariableMapping, VariableStore};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
