// ABOUTME: Plain placeholder substitution engine
// ABOUTME: Replaces {key} occurrences with values from the parameter mapping

use serde_json::Value;

use crate::script::engine::{value_to_text, Params, ScriptEngine};
use crate::script::error::EngineError;

pub const NAME: &str = "substitution";

/// Replaces `{key}` with the matching parameter.
///
/// Keys are made of ASCII letters, digits, `_`, `.` and `-`. `{{` and `}}`
/// produce literal braces. A `{` directly followed by a key opens a
/// placeholder, and a placeholder not closed right after its key is a syntax
/// error. Any other `{` is copied through. Unknown keys are left as written
/// unless the engine is strict.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionEngine {
    strict: bool,
}

impl SubstitutionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `MissingParameter` instead of leaving unknown placeholders.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn render(&self, template: &str, params: Option<&Params>) -> Result<String, EngineError> {
        let bytes = template.as_bytes();
        let mut out = String::with_capacity(template.len());
        let mut i = 0;
        let mut copied = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'{' if bytes.get(i + 1) == Some(&b'{') => {
                    out.push_str(&template[copied..i]);
                    out.push('{');
                    i += 2;
                    copied = i;
                }
                b'}' if bytes.get(i + 1) == Some(&b'}') => {
                    out.push_str(&template[copied..i]);
                    out.push('}');
                    i += 2;
                    copied = i;
                }
                b'{' => {
                    let key_start = i + 1;
                    let key_end = key_start
                        + bytes[key_start..]
                            .iter()
                            .take_while(|b| is_key_byte(**b))
                            .count();

                    if key_end == key_start {
                        i += 1;
                        continue;
                    }

                    match bytes.get(key_end) {
                        Some(b'}') => {
                            out.push_str(&template[copied..i]);
                            let key = &template[key_start..key_end];
                            match params.and_then(|p| p.get(key)) {
                                Some(value) => out.push_str(&value_to_text(value)),
                                None if self.strict => {
                                    return Err(EngineError::MissingParameter(key.to_string()));
                                }
                                None => out.push_str(&template[i..=key_end]),
                            }
                            i = key_end + 1;
                            copied = i;
                        }
                        _ => {
                            return Err(EngineError::syntax(format!(
                                "unterminated placeholder at byte {}",
                                i
                            )));
                        }
                    }
                }
                _ => i += 1,
            }
        }

        out.push_str(&template[copied..]);
        Ok(out)
    }
}

fn is_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-')
}

impl ScriptEngine for SubstitutionEngine {
    fn name(&self) -> &str {
        NAME
    }

    fn evaluate(
        &self,
        template: Option<&str>,
        params: Option<&Params>,
    ) -> std::result::Result<Value, EngineError> {
        match template {
            Some(template) => self.render(template, params).map(Value::String),
            None => Ok(Value::Null),
        }
    }
}
