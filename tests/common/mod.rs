// ABOUTME: Common fixtures for integration tests
// ABOUTME: Provides test engines with controllable behavior and parameter builders

#![allow(dead_code)]

use serde_json::Value;
use std::sync::Arc;

use scriptgate::script::{
    EngineError, EngineRegistry, EnginesConfig, EvaluationDispatcher, Params, ScriptEngine,
};

/// Build params from a JSON object literal
pub fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        other => panic!("params must be a JSON object, got {other}"),
    }
}

pub fn builtin_dispatcher() -> EvaluationDispatcher {
    EvaluationDispatcher::new(Arc::new(EngineRegistry::with_builtin_engines(
        &EnginesConfig::default(),
    )))
}

/// Rejects every non-null template with a fixed syntax error
pub struct RejectingEngine {
    pub name: String,
}

impl RejectingEngine {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl ScriptEngine for RejectingEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(
        &self,
        template: Option<&str>,
        _params: Option<&Params>,
    ) -> Result<Value, EngineError> {
        match template {
            Some(t) => Err(EngineError::syntax(format!("cannot parse '{}'", t))),
            None => Ok(Value::Null),
        }
    }
}

/// Panics on every call
pub struct PanickingEngine;

impl ScriptEngine for PanickingEngine {
    fn name(&self) -> &str {
        "panicking"
    }

    fn evaluate(
        &self,
        _template: Option<&str>,
        _params: Option<&Params>,
    ) -> Result<Value, EngineError> {
        panic!("engine internals exploded")
    }
}

/// Returns its own tag, used to tell registrations apart
pub struct TaggedEngine {
    pub name: String,
    pub tag: String,
}

impl TaggedEngine {
    pub fn new(name: &str, tag: &str) -> Self {
        Self {
            name: name.to_string(),
            tag: tag.to_string(),
        }
    }
}

impl ScriptEngine for TaggedEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(
        &self,
        _template: Option<&str>,
        _params: Option<&Params>,
    ) -> Result<Value, EngineError> {
        Ok(Value::String(self.tag.clone()))
    }
}

/// Uppercases the template and reports how many params it saw
pub struct ShoutingEngine;

impl ScriptEngine for ShoutingEngine {
    fn name(&self) -> &str {
        "shouting"
    }

    fn evaluate(
        &self,
        template: Option<&str>,
        params: Option<&Params>,
    ) -> Result<Value, EngineError> {
        let count = params.map_or(0, |p| p.len());
        Ok(template.map_or(Value::Null, |t| {
            Value::String(format!("{} ({})", t.to_uppercase(), count))
        }))
    }
}
