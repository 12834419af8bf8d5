// ABOUTME: Template renderer implementation using Handlebars
// ABOUTME: Renders document text against the merged variable mapping

use handlebars::{
    Context, Handlebars, RenderContext, RenderError, RenderErrorReason, Renderable, StringOutput,
    Template,
};
use serde::{Deserialize, Serialize};

use super::error::{Result, TemplateError};
use super::helpers;
use crate::variables::VariableMapping;

/// What happens when a placeholder names a variable that is not defined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndefinedPolicy {
    /// Missing variables render as the empty string
    #[default]
    Empty,
    /// Missing variables fail the render with `TemplateError::UndefinedVariable`
    Strict,
}

#[derive(Clone)]
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
    policy: UndefinedPolicy,
}

impl TemplateRenderer {
    /// Create a renderer with the default undefined-variable policy
    pub fn new() -> Self {
        Self::with_policy(UndefinedPolicy::default())
    }

    /// Create a renderer with all built-in helpers and the given policy
    pub fn with_policy(policy: UndefinedPolicy) -> Self {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(policy == UndefinedPolicy::Strict);
        handlebars.set_dev_mode(false);

        // Output is Markdown or plain text, never HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        helpers::register_helpers(&mut handlebars);

        Self { handlebars, policy }
    }

    pub fn policy(&self) -> UndefinedPolicy {
        self.policy
    }

    /// Render template text with the given variables
    pub fn render(&self, template_text: &str, variables: &VariableMapping) -> Result<String> {
        let template = compile(template_text)?;
        let context = Context::wraps(variables).map_err(classify_render_error)?;

        let mut render_context = RenderContext::new(None);
        let mut output = StringOutput::new();
        template
            .render(&self.handlebars, &context, &mut render_context, &mut output)
            .map_err(classify_render_error)?;

        output
            .into_string()
            .map_err(|e| TemplateError::Render(e.to_string()))
    }

    /// Validate template syntax without rendering
    pub fn validate(&self, template_text: &str) -> Result<()> {
        compile(template_text).map(|_| ())
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(template_text: &str) -> Result<Template> {
    Template::compile(template_text).map_err(|e| TemplateError::Syntax(e.to_string()))
}

fn classify_render_error(error: RenderError) -> TemplateError {
    match error.reason() {
        RenderErrorReason::TemplateError(e) => TemplateError::Syntax(e.to_string()),
        RenderErrorReason::MissingVariable(path) => TemplateError::UndefinedVariable(
            path.clone().unwrap_or_else(|| "<unknown>".to_string()),
        ),
        _ => TemplateError::Render(error.to_string()),
    }
}
