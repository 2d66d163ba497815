// ABOUTME: Script engine subsystem: engine contract, registry and dispatcher
// ABOUTME: Lets rendering features pick a template evaluator by name at runtime

pub mod dispatcher;
pub mod engine;
pub mod engines;
pub mod error;
pub mod registry;

pub use dispatcher::EvaluationDispatcher;
pub use engine::{value_to_text, Params, ScriptEngine};
pub use engines::{EnginesConfig, HandlebarsEngine, PassthroughEngine, SubstitutionEngine};
pub use error::{EngineError, Result, ScriptError};
pub use registry::EngineRegistry;
