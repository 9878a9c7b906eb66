//! Configuration management.
//!
//! Settings come from a TOML file with `[analysis]`, `[input]` and
//! `[output]` tables, then environment variables, then command-line flags.
//! A missing file means defaults.

use std::path::{Path, PathBuf};

use adapter_loader::LoaderConfig;
use eva_risk::analysis::AnalysisConfig;
use eva_risk::AnalysisError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Report format written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// A single JSON document
    Json,
}

/// Where and how results are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for the SVG plots
    pub dir: PathBuf,
    /// Report format
    pub format: OutputFormat,
    /// Whether to render plots at all
    pub plots: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("eva_output"),
            format: OutputFormat::Text,
            plots: true,
        }
    }
}

/// Full `eva` configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaConfig {
    /// Log level used unless `--verbose` or `RUST_LOG` says otherwise
    pub log_level: String,
    /// Analysis parameters
    pub analysis: AnalysisConfig,
    /// Input file layout
    pub input: LoaderConfig,
    /// Output settings
    pub output: OutputConfig,
    /// Environment overrides that could not be parsed
    #[serde(skip)]
    rejected_env: Vec<String>,
}

impl Default for EvaConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            analysis: AnalysisConfig::default(),
            input: LoaderConfig::default(),
            output: OutputConfig::default(),
            rejected_env: Vec::new(),
        }
    }
}

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl EvaConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path` if it exists, defaults otherwise.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `EVA_*` environment variable overrides.
    pub fn with_env_override(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup("EVA_THRESHOLD") {
            match raw.trim().parse() {
                Ok(value) => self.analysis.threshold = value,
                Err(_) => self.reject_env("EVA_THRESHOLD", &raw),
            }
        }

        if let Some(raw) = lookup("EVA_WINDOW_HOURS") {
            match raw.trim().parse() {
                Ok(value) => self.analysis.declustering_window_hours = value,
                Err(_) => self.reject_env("EVA_WINDOW_HOURS", &raw),
            }
        }

        if let Some(raw) = lookup("EVA_CONFIDENCE") {
            match raw.trim().parse() {
                Ok(value) => self.analysis.confidence_level = value,
                Err(_) => self.reject_env("EVA_CONFIDENCE", &raw),
            }
        }

        if let Some(dir) = lookup("EVA_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }

        if let Some(level) = lookup("EVA_LOG_LEVEL") {
            self.log_level = level;
        }

        self
    }

    fn reject_env(&mut self, key: &str, raw: &str) {
        self.rejected_env
            .push(format!("{} is not a number: '{}'", key, raw));
    }

    /// Validate the configuration, collecting every violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = self.rejected_env.clone();

        if let Err(AnalysisError::Config(analysis_errors)) = self.analysis.validate() {
            errors.extend(analysis_errors);
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if self.input.date_column.trim().is_empty() {
            errors.push("input.date_column cannot be empty".to_string());
        }
        if self.input.value_column.trim().is_empty() {
            errors.push("input.value_column cannot be empty".to_string());
        }
        if self.input.date_format.trim().is_empty() {
            errors.push("input.date_format cannot be empty".to_string());
        }

        if self.output.plots && self.output.dir.as_os_str().is_empty() {
            errors.push("output.dir cannot be empty when plots are enabled".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// The effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Configuration error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
