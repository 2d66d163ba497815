// ABOUTME: Helper functions available to templates rendered by the handlebars engine
// ABOUTME: Covers timestamps, identifiers, environment lookups, casing and encoding

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderError};
use std::env;
use std::fmt::{Display, Write as _};
use uuid::Uuid;

const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format via Display without panicking on invalid strftime specifiers
fn checked_format(formatted: impl Display, format: &str) -> Result<String, RenderError> {
    let mut out = String::new();
    write!(out, "{}", formatted)
        .map_err(|_| RenderError::new(format!("invalid time format: {}", format)))?;
    Ok(out)
}

fn str_param<'a>(h: &'a Helper, index: usize) -> Option<&'a str> {
    h.param(index).and_then(|v| v.value().as_str())
}

fn required_str_param<'a>(h: &'a Helper, index: usize, what: &str) -> Result<&'a str, RenderError> {
    str_param(h, index)
        .ok_or_else(|| RenderError::new(format!("{} helper requires {}", h.name(), what)))
}

/// `{{timestamp "%Y"}}` - current UTC time, optional strftime format
pub fn timestamp_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let format = str_param(h, 0).unwrap_or(DEFAULT_TIME_FORMAT);
    out.write(&checked_format(Utc::now().format(format), format)?)?;
    Ok(())
}

/// `{{uuid}}` - a fresh v4 UUID
pub fn uuid_helper(
    _: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&Uuid::new_v4().to_string())?;
    Ok(())
}

/// `{{env "NAME" "fallback"}}`
pub fn env_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let var_name = required_str_param(h, 0, "a variable name")?;
    let fallback = str_param(h, 1).unwrap_or("");
    let value = env::var(var_name).unwrap_or_else(|_| fallback.to_string());
    out.write(&value)?;
    Ok(())
}

pub fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let input = required_str_param(h, 0, "a string")?;
    out.write(&input.to_uppercase())?;
    Ok(())
}

pub fn lower_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let input = required_str_param(h, 0, "a string")?;
    out.write(&input.to_lowercase())?;
    Ok(())
}

/// `{{default value "fallback"}}` - fallback when value is missing, null or empty
pub fn default_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let fallback = required_str_param(h, 1, "a fallback value")?;
    let value = h
        .param(0)
        .map(|v| crate::script::engine::value_to_text(v.value()))
        .unwrap_or_default();

    out.write(if value.is_empty() { fallback } else { value.as_str() })?;
    Ok(())
}

/// `{{join items ", "}}` - joins an array, separator defaults to ","
pub fn join_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let items = h
        .param(0)
        .and_then(|v| v.value().as_array())
        .ok_or_else(|| RenderError::new("join helper requires an array"))?;
    let separator = str_param(h, 1).unwrap_or(",");

    let joined = items
        .iter()
        .map(crate::script::engine::value_to_text)
        .collect::<Vec<_>>()
        .join(separator);
    out.write(&joined)?;
    Ok(())
}

pub fn base64_encode_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let input = required_str_param(h, 0, "a string")?;
    out.write(&BASE64.encode(input.as_bytes()))?;
    Ok(())
}

pub fn base64_decode_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let input = required_str_param(h, 0, "a string")?;
    let bytes = BASE64
        .decode(input)
        .map_err(|e| RenderError::new(format!("base64 decode error: {}", e)))?;
    let decoded = String::from_utf8(bytes)
        .map_err(|e| RenderError::new(format!("decoded base64 is not UTF-8: {}", e)))?;
    out.write(&decoded)?;
    Ok(())
}

/// `{{format_time ts "%Y"}}` - ts is RFC 3339 or unix seconds
pub fn format_time_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let raw = h
        .param(0)
        .map(|v| crate::script::engine::value_to_text(v.value()))
        .ok_or_else(|| RenderError::new("format_time helper requires a timestamp"))?;
    let format = str_param(h, 1).unwrap_or(DEFAULT_TIME_FORMAT);

    let datetime = parse_timestamp(&raw)
        .ok_or_else(|| RenderError::new(format!("unrecognized timestamp: {}", raw)))?;
    out.write(&checked_format(datetime.format(format), format)?)?;
    Ok(())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    let seconds = raw.parse::<i64>().ok()?;
    Utc.timestamp_opt(seconds, 0).single().map(Into::into)
}

pub fn register_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper("timestamp", Box::new(timestamp_helper));
    handlebars.register_helper("uuid", Box::new(uuid_helper));
    handlebars.register_helper("env", Box::new(env_helper));
    handlebars.register_helper("upper", Box::new(upper_helper));
    handlebars.register_helper("lower", Box::new(lower_helper));
    handlebars.register_helper("default", Box::new(default_helper));
    handlebars.register_helper("join", Box::new(join_helper));
    handlebars.register_helper("base64_encode", Box::new(base64_encode_helper));
    handlebars.register_helper("base64_decode", Box::new(base64_decode_helper));
    handlebars.register_helper("format_time", Box::new(format_time_helper));
}
