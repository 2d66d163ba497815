// ABOUTME: Resolves engine names against the registry and runs evaluations
// ABOUTME: Normalizes every engine failure, including panics, into a ScriptError

use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

use super::engine::{value_to_text, Params};
use super::error::{EngineError, Result, ScriptError};
use super::registry::EngineRegistry;

/// Entry point used by rendering features.
///
/// Name resolution follows one rule, fixed at construction: a missing or empty
/// engine name resolves to the configured default engine. Without a default
/// such a request fails with `UnknownEngine` for the empty name. A non-empty
/// name is always used as given. Failed evaluations are reported once and never
/// retried.
#[derive(Debug, Clone)]
pub struct EvaluationDispatcher {
    registry: Arc<EngineRegistry>,
    default_engine: Option<String>,
}

impl EvaluationDispatcher {
    pub fn new(registry: Arc<EngineRegistry>) -> Self {
        Self {
            registry,
            default_engine: None,
        }
    }

    /// Set the engine used when a request names none. Empty means no default.
    pub fn with_default_engine(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.default_engine = (!name.is_empty()).then_some(name);
        self
    }

    pub fn default_engine(&self) -> Option<&str> {
        self.default_engine.as_deref()
    }

    pub fn registry(&self) -> &Arc<EngineRegistry> {
        &self.registry
    }

    fn resolve_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(name) if !name.is_empty() => name,
            _ => self.default_engine.as_deref().unwrap_or(""),
        }
    }

    /// Evaluate `template` with the named engine (or the default).
    pub fn evaluate(
        &self,
        engine_name: Option<&str>,
        template: Option<&str>,
        params: Option<&Params>,
    ) -> Result<Value> {
        let name = self.resolve_name(engine_name);

        let engine = self.registry.lookup(name).ok_or_else(|| {
            debug!("No script engine registered as '{}'", name);
            ScriptError::UnknownEngine {
                name: name.to_string(),
            }
        })?;

        debug!("Evaluating template with script engine: {}", name);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| engine.evaluate(template, params)))
            .unwrap_or_else(|payload| Err(EngineError::Panicked(panic_message(payload.as_ref()))));

        outcome.map_err(|source| ScriptError::Evaluation {
            name: name.to_string(),
            source,
        })
    }

    /// Evaluate for display, falling back to the raw template on failure.
    ///
    /// Text results are returned verbatim, other values as JSON; a null result
    /// gives `None`.
    pub fn evaluate_or_raw(
        &self,
        engine_name: Option<&str>,
        template: Option<&str>,
        params: Option<&Params>,
    ) -> Option<String> {
        match self.evaluate(engine_name, template, params) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value_to_text(&value)),
            Err(e) => {
                warn!("Showing unevaluated template: {}", e);
                template.map(str::to_string)
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
