// ABOUTME: Pipeline driver module for docrender
// ABOUTME: Discovers templates, renders them and mirrors the tree into the output directory

pub mod discovery;
pub mod driver;
pub mod error;
pub mod summary;
pub mod writer;

pub use discovery::SourceFile;
pub use driver::{FailurePolicy, Pipeline, DEFAULT_TEMPLATE_EXTENSIONS};
pub use error::{PipelineError, Result};
pub use summary::{FileAction, FileFailure, ProcessedFile, RunSummary};
pub use writer::OutputWriter;
