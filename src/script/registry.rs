// ABOUTME: Name-keyed registry of script engines shared by all callers
// ABOUTME: Supports registration, replacement, removal, lookup and name snapshots

use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

use super::engine::ScriptEngine;
use super::engines::{EnginesConfig, HandlebarsEngine, PassthroughEngine, SubstitutionEngine};
use super::error::{Result, ScriptError};

/// Thread-safe mapping from engine name to engine.
///
/// Owned by the host's composition root and shared through `Arc`. Reads take a
/// shared lock just long enough to clone the engine handle, so evaluation never
/// runs under the lock. Each write replaces a single entry, so a concurrent
/// reader sees either the old or the new binding.
#[derive(Default)]
pub struct EngineRegistry {
    engines: RwLock<HashMap<String, Arc<dyn ScriptEngine>>>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the passthrough, substitution and handlebars engines
    pub fn with_builtin_engines(config: &EnginesConfig) -> Self {
        let registry = Self::new();

        let substitution = if config.substitution_strict {
            SubstitutionEngine::strict()
        } else {
            SubstitutionEngine::new()
        };

        for engine in [
            Arc::new(PassthroughEngine) as Arc<dyn ScriptEngine>,
            Arc::new(substitution),
            Arc::new(HandlebarsEngine::with_strict_mode(config.handlebars_strict)),
        ] {
            if let Err(e) = registry.register_engine(engine) {
                warn!("Skipping built-in engine: {}", e);
            }
        }

        registry
    }

    /// Bind `name` to `engine`, returning the engine it replaced, if any.
    pub fn register(
        &self,
        name: impl Into<String>,
        engine: Arc<dyn ScriptEngine>,
    ) -> Result<Option<Arc<dyn ScriptEngine>>> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ScriptError::InvalidName { name });
        }

        let previous = self.engines.write().insert(name.clone(), engine);
        match previous {
            Some(_) => warn!("Script engine '{}' replaced an existing registration", name),
            None => debug!("Registered script engine: {}", name),
        }
        Ok(previous)
    }

    /// Register an engine under its own name.
    pub fn register_engine(
        &self,
        engine: Arc<dyn ScriptEngine>,
    ) -> Result<Option<Arc<dyn ScriptEngine>>> {
        let name = engine.name().to_string();
        self.register(name, engine)
    }

    /// Remove the binding for `name`. Absent names are ignored.
    pub fn unregister(&self, name: &str) -> Option<Arc<dyn ScriptEngine>> {
        let removed = self.engines.write().remove(name);
        if removed.is_some() {
            debug!("Unregistered script engine: {}", name);
        }
        removed
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn ScriptEngine>> {
        self.engines.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.engines.read().contains_key(name)
    }

    /// Sorted snapshot of the registered names.
    pub fn names(&self) -> BTreeSet<String> {
        self.engines.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.engines.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.read().is_empty()
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("engines", &self.names())
            .finish()
    }
}
