// ABOUTME: Template rendering module for docrender
// ABOUTME: Wraps the Handlebars engine behind a narrow render/validate interface

pub mod engine;
pub mod error;
pub mod helpers;

pub use engine::{TemplateRenderer, UndefinedPolicy};
pub use error::{Result, TemplateError};
