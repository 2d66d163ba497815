// ABOUTME: Error types for script engine registration, lookup and evaluation
// ABOUTME: Separates engine-level failures from the classified errors callers see

use thiserror::Error;

/// Failure raised by a single engine while evaluating a template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Template syntax error: {message}")]
    Syntax { message: String },

    #[error("Template render error: {0}")]
    Render(String),

    #[error("Missing template parameter: {0}")]
    MissingParameter(String),

    #[error("Engine panicked: {0}")]
    Panicked(String),

    #[error("Engine error: {0}")]
    Other(String),
}

impl EngineError {
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
        }
    }
}

impl From<handlebars::TemplateError> for EngineError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::syntax(err.to_string())
    }
}

/// A render error caused by a template that failed to compile is a syntax error
impl From<handlebars::RenderError> for EngineError {
    fn from(err: handlebars::RenderError) -> Self {
        let mut cause = std::error::Error::source(&err);
        while let Some(e) = cause {
            if let Some(template_err) = e.downcast_ref::<handlebars::TemplateError>() {
                return Self::syntax(template_err.to_string());
            }
            cause = e.source();
        }
        Self::Render(err.to_string())
    }
}

/// Every fault crossing the registry or dispatcher boundary is one of these.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Invalid engine name: {name:?}")]
    InvalidName { name: String },

    #[error("Unknown script engine: {name:?}")]
    UnknownEngine { name: String },

    #[error("Engine '{name}' failed to evaluate template: {source}")]
    Evaluation {
        name: String,
        #[source]
        source: EngineError,
    },
}

impl ScriptError {
    /// Name of the engine the error refers to.
    pub fn engine_name(&self) -> &str {
        match self {
            Self::InvalidName { name }
            | Self::UnknownEngine { name }
            | Self::Evaluation { name, .. } => name,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScriptError>;
