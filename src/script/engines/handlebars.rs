// ABOUTME: Script engine backed by the Handlebars template runtime
// ABOUTME: Translates handlebars compile and render failures into engine errors

use handlebars::Handlebars;
use serde_json::Value;
use tracing::debug;

use super::helpers;
use crate::script::engine::{Params, ScriptEngine};
use crate::script::error::EngineError;

pub const NAME: &str = "handlebars";

#[derive(Clone)]
pub struct HandlebarsEngine {
    handlebars: Handlebars<'static>,
}

impl HandlebarsEngine {
    /// Create an engine with all built-in helpers registered
    pub fn new() -> Self {
        Self::with_strict_mode(false)
    }

    /// In strict mode a reference to a missing parameter is a render error
    pub fn with_strict_mode(strict: bool) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(strict);
        handlebars.set_dev_mode(false);

        // Output is plain text (alert and notification bodies), not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        helpers::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    pub fn is_strict(&self) -> bool {
        self.handlebars.strict_mode()
    }

    /// Check template syntax without rendering
    pub fn validate_template(&self, template: &str) -> Result<(), EngineError> {
        handlebars::Template::compile(template)?;
        Ok(())
    }

    /// Compile failures inside `render_template` come back as `Syntax`
    fn render(&self, template: &str, params: &Params) -> Result<String, EngineError> {
        let rendered = self.handlebars.render_template(template, params)?;
        debug!("Handlebars rendered {} characters", rendered.len());
        Ok(rendered)
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptEngine for HandlebarsEngine {
    fn name(&self) -> &str {
        NAME
    }

    fn evaluate(
        &self,
        template: Option<&str>,
        params: Option<&Params>,
    ) -> std::result::Result<Value, EngineError> {
        let Some(template) = template else {
            return Ok(Value::Null);
        };

        let empty = Params::new();
        self.render(template, params.unwrap_or(&empty))
            .map(Value::String)
    }
}
