// ABOUTME: Handlebars helper functions available to every document template
// ABOUTME: Implements default values, case conversion, joining, JSON output and env lookup

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason,
};
use serde_json::Value as JsonValue;
use std::env;

/// Text form of a variable value as it appears in a rendered document
fn value_to_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_blank(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Default helper - `{{default value "fallback"}}` writes the fallback for missing or empty values
pub fn default_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let fallback = h
        .param(1)
        .map(|v| v.value())
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("default", 1))?;

    let chosen = match h.param(0).map(|v| v.value()) {
        Some(value) if !is_blank(value) => value,
        _ => fallback,
    };

    out.write(&value_to_text(chosen))?;
    Ok(())
}

/// Uppercase helper
pub fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let input = h
        .param(0)
        .map(|v| value_to_text(v.value()))
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("upper", 0))?;

    out.write(&input.to_uppercase())?;
    Ok(())
}

/// Lowercase helper
pub fn lower_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let input = h
        .param(0)
        .map(|v| value_to_text(v.value()))
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("lower", 0))?;

    out.write(&input.to_lowercase())?;
    Ok(())
}

/// Join helper - `{{join items ", "}}` joins a sequence, separator defaults to ","
pub fn join_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let items = h
        .param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("join", 0))?
        .value();
    let separator = h.param(1).and_then(|v| v.value().as_str()).unwrap_or(",");

    let joined = match items {
        JsonValue::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(separator),
        JsonValue::Null => String::new(),
        other => {
            return Err(RenderErrorReason::Other(format!(
                "join helper expects a sequence, found {}",
                other
            ))
            .into())
        }
    };

    out.write(&joined)?;
    Ok(())
}

/// JSON helper - writes the JSON encoding of any value
pub fn json_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    if let Some(v) = h.param(0) {
        let encoded = serde_json::to_string(v.value())
            .map_err(|e| RenderErrorReason::Other(format!("JSON encode error: {}", e)))?;
        out.write(&encoded)?;
    }
    Ok(())
}

/// Environment variable helper - `{{env "NAME" "fallback"}}`
pub fn env_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let var_name = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("env", 0))?;

    let fallback = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("");

    let value = env::var(var_name).unwrap_or_else(|_| fallback.to_string());
    out.write(&value)?;
    Ok(())
}

/// Register all built-in helpers with a Handlebars instance
pub fn register_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper("default", Box::new(default_helper));
    handlebars.register_helper("upper", Box::new(upper_helper));
    handlebars.register_helper("lower", Box::new(lower_helper));
    handlebars.register_helper("join", Box::new(join_helper));
    handlebars.register_helper("json", Box::new(json_helper));
    handlebars.register_helper("env", Box::new(env_helper));
}
