//! CLI error types.

use adapter_loader::LoaderError;
use eva_risk::AnalysisError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `eva` commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A command-line value was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The input file could not be turned into a daily series.
    #[error("Input error: {0}")]
    Loader(#[from] LoaderError),

    /// Fitting or risk computation failed.
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON report serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
