// ABOUTME: Command implementations for the scriptgate CLI
// ABOUTME: Builds the engine registry from config and runs render and engines commands

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::Args;
use crate::config::Config;
use crate::script::{value_to_text, EngineRegistry, EvaluationDispatcher, Params};

/// Composition root: registry with built-in engines plus the configured default
pub fn build_dispatcher(config: &Config) -> EvaluationDispatcher {
    let registry = Arc::new(EngineRegistry::with_builtin_engines(&config.engines));
    let dispatcher = EvaluationDispatcher::new(registry);

    match &config.default_engine {
        Some(name) => dispatcher.with_default_engine(name.clone()),
        None => dispatcher,
    }
}

/// Config template variables overlaid with command line parameters
pub fn collect_params(config: &Config, vars: &[String]) -> Result<Params> {
    let mut params: Params = config
        .template_vars
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    params.extend(Args::parse_variables(vars)?);
    Ok(params)
}

/// Render a template and return the text to print.
///
/// Without `strict`, unknown engines and evaluation failures fall back to the
/// raw template. A null result renders as an empty string.
pub fn render_template(
    config: &Config,
    engine: Option<String>,
    template: Option<String>,
    file: Option<PathBuf>,
    vars: &[String],
    strict: bool,
) -> Result<String> {
    let template = match (template, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read template file {}", path.display()))?,
        (None, None) => anyhow::bail!("Either --template or --file must be provided"),
    };

    let params = collect_params(config, vars)?;
    debug!("Rendering with {} parameters", params.len());

    let dispatcher = build_dispatcher(config);

    if strict {
        let value = dispatcher.evaluate(engine.as_deref(), Some(&template), Some(&params))?;
        Ok(value_to_text(&value))
    } else {
        Ok(dispatcher
            .evaluate_or_raw(engine.as_deref(), Some(&template), Some(&params))
            .unwrap_or_default())
    }
}

/// Names of the engines available to `render`, marking the default
pub fn list_engines(config: &Config) -> Vec<String> {
    let dispatcher = build_dispatcher(config);
    let default = dispatcher.default_engine();

    dispatcher
        .registry()
        .names()
        .into_iter()
        .map(|name| {
            if Some(name.as_str()) == default {
                format!("{} (default)", name)
            } else {
                name
            }
        })
        .collect()
}

pub fn run_render(
    config: &Config,
    engine: Option<String>,
    template: Option<String>,
    file: Option<PathBuf>,
    vars: Vec<String>,
    strict: bool,
) -> Result<()> {
    info!(
        "Rendering template with engine: {}",
        engine
            .as_deref()
            .or(config.default_engine.as_deref())
            .unwrap_or("<none>")
    );
    let output = render_template(config, engine, template, file, &vars, strict)?;
    println!("{}", output);
    Ok(())
}

pub fn run_engines(config: &Config) -> Result<()> {
    for line in list_engines(config) {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_render_inline_substitution() {
        let config = Config::default();
        let output = render_template(
            &config,
            Some("substitution".to_string()),
            Some("Hello {name}".to_string()),
            None,
            &["name=World".to_string()],
            false,
        )
        .unwrap();
        assert_eq!(output, "Hello World");
    }

    #[test]
    fn test_render_uses_default_engine() {
        let config = Config::default();
        let output = render_template(
            &config,
            None,
            Some("Hello {name}".to_string()),
            None,
            &["name=World".to_string()],
            false,
        )
        .unwrap();
        assert_eq!(output, "Hello {name}");
    }

    #[test]
    fn test_render_from_file_with_config_vars() {
        let temp_dir = tempdir().unwrap();
        let template_path = temp_dir.path().join("alert.hbs");
        fs::write(&template_path, "{{site}}: {{job}} failed").unwrap();

        let mut config = Config::default();
        config
            .template_vars
            .insert("site".to_string(), "docs".to_string());

        let output = render_template(
            &config,
            Some("handlebars".to_string()),
            None,
            Some(template_path),
            &["job=crawler".to_string()],
            true,
        )
        .unwrap();
        assert_eq!(output, "docs: crawler failed");
    }

    #[test]
    fn test_cli_vars_override_config_vars() {
        let mut config = Config::default();
        config
            .template_vars
            .insert("env".to_string(), "staging".to_string());

        let params = collect_params(&config, &["env=prod".to_string()]).unwrap();
        assert_eq!(params.get("env"), Some(&Value::String("prod".to_string())));
    }

    #[test]
    fn test_render_degrades_without_strict() {
        let config = Config::default();
        let output = render_template(
            &config,
            Some("velocity".to_string()),
            Some("raw $template".to_string()),
            None,
            &[],
            false,
        )
        .unwrap();
        assert_eq!(output, "raw $template");
    }

    #[test]
    fn test_render_strict_fails() {
        let config = Config::default();
        let result = render_template(
            &config,
            Some("substitution".to_string()),
            Some("broken {name".to_string()),
            None,
            &[],
            true,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_list_engines_marks_default() {
        let config = Config::default();
        assert_eq!(
            list_engines(&config),
            vec![
                "handlebars".to_string(),
                "passthrough (default)".to_string(),
                "substitution".to_string(),
            ]
        );
    }
}
