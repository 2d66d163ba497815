// ABOUTME: Built-in script engine implementations
// ABOUTME: Identity, placeholder substitution and Handlebars engines

use serde::{Deserialize, Serialize};

pub mod handlebars;
pub mod helpers;
pub mod passthrough;
pub mod substitution;

pub use self::handlebars::HandlebarsEngine;
pub use passthrough::PassthroughEngine;
pub use substitution::SubstitutionEngine;

/// Construction options for the built-in engines
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EnginesConfig {
    #[serde(default)]
    pub handlebars_strict: bool,

    #[serde(default)]
    pub substitution_strict: bool,
}
