// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the render and engines subcommands of the scriptgate host

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use crate::script::Params;

#[derive(Parser, Debug)]
#[command(name = "scriptgate")]
#[command(about = "Render templates through a pluggable, name-selected script engine")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a template with a registered engine
    Render {
        #[arg(short, long, help = "Engine name (defaults to the configured default engine)")]
        engine: Option<String>,

        #[arg(
            short,
            long,
            conflicts_with = "file",
            required_unless_present = "file",
            help = "Inline template text"
        )]
        template: Option<String>,

        #[arg(short, long, help = "Read the template from a file")]
        file: Option<PathBuf>,

        #[arg(
            short = 'V',
            long = "var",
            help = "Template parameter (key=value, value parsed as JSON when possible)"
        )]
        vars: Vec<String>,

        #[arg(long, help = "Fail instead of printing the raw template on errors")]
        strict: bool,
    },

    /// List registered engine names
    Engines,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse `key=value` pairs into template parameters.
    ///
    /// Values that are valid JSON (numbers, booleans, null, arrays, objects,
    /// quoted strings) keep their type; anything else is a plain string.
    pub fn parse_variables(vars: &[String]) -> anyhow::Result<Params> {
        let mut params = Params::new();

        for var in vars {
            let Some((key, raw)) = var.split_once('=') else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'key=value'",
                    var
                ));
            };
            if key.is_empty() {
                return Err(anyhow::anyhow!("Variable name missing in '{}'", var));
            }

            let value =
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
            params.insert(key.to_string(), value);
        }

        Ok(params)
    }
}
