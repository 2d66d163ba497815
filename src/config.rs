// ABOUTME: Configuration for the script engine host
// ABOUTME: Loads YAML config from standard locations and applies environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

pub use crate::script::engines::EnginesConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Engine used when a render request names none
    #[serde(default = "default_engine")]
    pub default_engine: Option<String>,

    #[serde(default)]
    pub engines: EnginesConfig,

    /// Parameters merged into every render
    #[serde(default)]
    pub template_vars: HashMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_engine() -> Option<String> {
    Some(crate::script::engines::passthrough::NAME.to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_engine: default_engine(),
            engines: EnginesConfig::default(),
            template_vars: HashMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => anyhow::bail!("Config file not found: {}", p.display()),
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config {}", config_path.display()))?;
            Self::from_yaml(&contents)
                .with_context(|| format!("Invalid config {}", config_path.display()))?
        } else {
            Config::default()
        };

        config.merge_env();
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    fn find_config_file() -> PathBuf {
        let candidates = [
            PathBuf::from("scriptgate.yaml"),
            PathBuf::from("scriptgate.yml"),
            PathBuf::from(".scriptgate.yaml"),
        ];

        if let Some(found) = candidates.iter().find(|p| p.exists()) {
            return found.clone();
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".scriptgate").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        PathBuf::from("scriptgate.yaml")
    }

    fn merge_env(&mut self) {
        if let Ok(engine) = std::env::var("SCRIPTGATE_DEFAULT_ENGINE") {
            self.default_engine = (!engine.is_empty()).then_some(engine);
        }
        if let Ok(level) = std::env::var("SCRIPTGATE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SCRIPTGATE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}
