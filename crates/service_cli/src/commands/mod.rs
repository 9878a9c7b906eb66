//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod analyse;
pub mod check;
pub mod describe;
pub mod extremes;

use std::path::{Path, PathBuf};

use adapter_loader::{CsvLoader, LoaderConfig};
use clap::Args;
use eva_core::types::DailySeries;
use eva_risk::analysis::AnalysisConfig;

use crate::{CliError, Result};

/// Input file argument shared by the data commands.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the CSV file of daily counts
    #[arg(short, long)]
    pub input: PathBuf,
}

/// Threshold and declustering overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct PotArgs {
    /// POT threshold; values strictly above it are exceedances
    #[arg(short = 'u', long)]
    pub threshold: Option<f64>,

    /// Declustering window in hours
    #[arg(short = 'w', long)]
    pub window_hours: Option<f64>,
}

impl PotArgs {
    /// Applies the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(hours) = self.window_hours {
            config.declustering_window_hours = hours;
        }
    }
}

/// Loads and gap-fills the input file.
pub fn load_series(path: &Path, config: &LoaderConfig) -> Result<DailySeries> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    if path.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "{} is a directory, expected a CSV file",
            path.display()
        )));
    }
    Ok(CsvLoader::new(config.clone()).load_path(path)?)
}
