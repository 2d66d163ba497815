// ABOUTME: The capability every script engine implements
// ABOUTME: Defines the parameter mapping type and the evaluate contract

use serde_json::Value;
use std::collections::HashMap;

use super::error::EngineError;

/// Read-only context handed to an engine alongside the template.
pub type Params = HashMap<String, Value>;

/// A named, stateless template evaluation strategy.
///
/// Implementations are shared across threads and invoked concurrently, so they
/// must not keep per-call state. A `None` template or `None` params must be
/// handled without panicking; the built-in engines map a `None` template to
/// `Value::Null` and treat `None` params as empty.
pub trait ScriptEngine: Send + Sync {
    /// Stable registry key for this engine.
    fn name(&self) -> &str;

    fn evaluate(
        &self,
        template: Option<&str>,
        params: Option<&Params>,
    ) -> std::result::Result<Value, EngineError>;
}

impl std::fmt::Debug for dyn ScriptEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptEngine")
            .field("name", &self.name())
            .finish()
    }
}

/// Render a parameter value as template text.
///
/// Strings are written verbatim, null becomes empty, anything else is compact JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(&json!("plain")), "plain");
        assert_eq!(value_to_text(&Value::Null), "");
        assert_eq!(value_to_text(&json!(42)), "42");
        assert_eq!(value_to_text(&json!(true)), "true");
        assert_eq!(value_to_text(&json!(["a", 1])), "[\"a\",1]");
        assert_eq!(value_to_text(&json!({"k": "v"})), "{\"k\":\"v\"}");
    }
}
