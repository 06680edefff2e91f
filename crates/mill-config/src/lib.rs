//! Configuration for the dequalify tool.
//!
//! # Configuration Hierarchy
//!
//! Settings are resolved in the following order of precedence (highest to lowest):
//! 1. **Command-line flags**, applied by the binary after loading.
//! 2. **Environment Variables**: `DEQUALIFY_*` (e.g., `DEQUALIFY_EXEMPT_NAMES='[Generated]'`)
//! 3. **Project Configuration**: `.mill/dequalify.toml` in the project root.
//! 4. **Default Values**: Hardcoded defaults in the configuration structs.
//!
//! # Configuration File Example
//!
//! ```toml
//! # .mill/dequalify.toml
//! source_roots = ["backend/src/main/java", "backend/src/test/java"]
//! builtin_packages = ["java.lang"]
//! exempt_names = []
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```
//!
//! Nested keys use `__` in environment variables:
//!
//! ```bash
//! export DEQUALIFY_LOGGING__FORMAT=json
//! ```

pub mod logging;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory holding project-level configuration, relative to the root
pub const CONFIG_DIR: &str = ".mill";

/// Configuration file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "dequalify.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "DEQUALIFY_";

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DequalifyConfig {
    /// Source trees to process, relative to the project root
    pub source_roots: Vec<PathBuf>,
    /// Source file suffix, without the dot
    pub extension: String,
    /// Packages whose types never need an import
    pub builtin_packages: Vec<String>,
    /// Simple names that are always shortened and never imported
    pub exempt_names: Vec<String>,
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format for development
    #[default]
    Pretty,
    /// Structured JSON format for CI
    Json,
}

impl Default for DequalifyConfig {
    fn default() -> Self {
        Self {
            source_roots: vec![
                PathBuf::from("backend/src/main/java"),
                PathBuf::from("backend/src/test/java"),
            ],
            extension: "java".to_string(),
            builtin_packages: vec!["java.lang".to_string()],
            exempt_names: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl DequalifyConfig {
    /// Loads configuration for the project at `project_root`.
    ///
    /// A missing configuration file is not an error; a malformed one is.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        Self::figment(project_root).extract().map_err(ConfigError::from)
    }

    /// The layered configuration sources, lowest precedence first
    pub fn figment(project_root: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(Self::config_path(project_root)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Location of the project configuration file
    pub fn config_path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Source trees resolved against `project_root`
    pub fn source_trees(&self, project_root: &Path) -> Vec<PathBuf> {
        self.source_roots
            .iter()
            .map(|tree| project_root.join(tree))
            .collect()
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Figment error: {0}")]
    Figment(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}
