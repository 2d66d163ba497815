// ABOUTME: Main library module for the scriptgate script engine host
// ABOUTME: Exports the engine registry, dispatcher, built-in engines and CLI

pub mod cli;
pub mod config;
pub mod script;

// Re-export commonly used types
pub use cli::{App, Args};
pub use config::Config;
pub use script::{
    EngineError, EngineRegistry, EvaluationDispatcher, Params, ScriptEngine, ScriptError,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
