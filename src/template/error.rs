// ABOUTME: Error types for template rendering operations
// ABOUTME: Separates malformed syntax, undefined variables and other engine failures

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template syntax error: {0}")]
    Syntax(String),

    #[error("Undefined template variable: {0}")]
    UndefinedVariable(String),

    #[error("Template render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
