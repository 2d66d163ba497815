// ABOUTME: Identity engine that returns every template unchanged
// ABOUTME: Reference implementation of the engine contract

use serde_json::Value;

use crate::script::engine::{Params, ScriptEngine};
use crate::script::error::EngineError;

pub const NAME: &str = "passthrough";

/// Returns the template as-is; parameters are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughEngine;

impl ScriptEngine for PassthroughEngine {
    fn name(&self) -> &str {
        NAME
    }

    fn evaluate(
        &self,
        template: Option<&str>,
        _params: Option<&Params>,
    ) -> std::result::Result<Value, EngineError> {
        Ok(template.map_or(Value::Null, |t| Value::String(t.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, Value)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_name_is_stable() {
        let engine = PassthroughEngine;
        assert_eq!(engine.name(), "passthrough");
        assert_eq!(engine.name(), engine.name());
    }

    #[test]
    fn test_null_template() {
        let engine = PassthroughEngine;
        assert_eq!(engine.evaluate(None, Some(&Params::new())).unwrap(), Value::Null);
        assert_eq!(engine.evaluate(None, None).unwrap(), Value::Null);
    }

    #[test]
    fn test_empty_template() {
        let engine = PassthroughEngine;
        assert_eq!(engine.evaluate(Some(""), Some(&Params::new())).unwrap(), json!(""));
    }

    #[test]
    fn test_null_params() {
        let engine = PassthroughEngine;
        assert_eq!(engine.evaluate(Some("test"), None).unwrap(), json!("test"));
    }

    #[test]
    fn test_params_are_ignored_and_untouched() {
        let engine = PassthroughEngine;
        let params = params(&[("k", json!("v")), ("n", json!(1)), ("missing", Value::Null)]);
        let before = params.clone();

        let result = engine.evaluate(Some("abc"), Some(&params)).unwrap();

        assert_eq!(result, json!("abc"));
        assert_eq!(params, before);
    }

    #[test]
    fn test_template_syntax_is_not_interpreted() {
        let engine = PassthroughEngine;
        let params = params(&[("name", json!("World"))]);

        for template in [
            "Hello {name}",
            "Hello {{name}}",
            "${name}",
            "#{name}",
            "{{#if x}}y{{/if}}",
            "unterminated {",
        ] {
            assert_eq!(
                engine.evaluate(Some(template), Some(&params)).unwrap(),
                json!(template)
            );
        }
    }

    #[test]
    fn test_preserves_whitespace_and_unicode() {
        let engine = PassthroughEngine;
        for template in ["  padded  ", "line1\nline2\r\n\ttab", "日本語 ✓ émoji 🎉", "\0nul"] {
            assert_eq!(engine.evaluate(Some(template), None).unwrap(), json!(template));
        }
    }

    #[test]
    fn test_large_template() {
        let engine = PassthroughEngine;
        let template = "x".repeat(100_000);
        assert_eq!(
            engine.evaluate(Some(&template), None).unwrap(),
            Value::String(template)
        );
    }
}
