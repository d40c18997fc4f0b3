//! Configuration file loading
//!
//! Settings come from a TOML file; command-line flags override them.

use anyhow::{Context, Result};
use danang_coverage::{AnalysisOptions, ClusterStrategy, DefaultRadii, RadiusPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigSchema {
    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub radii: DefaultRadii,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analysis defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Governing radius for Layer-A offices
    #[serde(default)]
    pub radius_policy: RadiusPolicy,

    /// Overlap grouping strategy
    #[serde(default)]
    pub clustering: ClusterStrategy,

    /// Drop Layer-C offices that duplicate a Layer-A/B location
    #[serde(default)]
    pub dedupe_layer_c: bool,
}

impl AnalysisConfig {
    /// Options for the library, before command-line overrides.
    pub fn options(&self) -> AnalysisOptions {
        AnalysisOptions::with_policy(self.radius_policy).clustering(self.clustering)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, a standard location, or
    /// fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        let schema = match &config_path {
            Some(p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = ["dn-coverage.toml", ".dn-coverage.toml", ".config/dn-coverage.toml"];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    parse_config(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
}

fn parse_config(content: &str) -> Result<ConfigSchema> {
    Ok(toml::from_str(content)?)
}
