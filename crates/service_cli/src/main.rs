//! eva - Extreme Value Analysis of daily fatality counts
//!
//! This is the operational entry point of the workspace.
//!
//! # Commands
//!
//! - `eva analyse --input <csv>` - Fit a GPD to the peaks over threshold and report VaR/ES
//! - `eva extremes --input <csv>` - List the declustered extremes
//! - `eva describe --input <csv>` - Preview the gap-filled series with summary statistics
//! - `eva check` - Validate and print the effective configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires the CSV adapter to the
//! eva_core / eva_models / eva_risk layers and renders their results.
//! Configuration is read from `eva.toml` (or `--config`), overridden by
//! `EVA_*` environment variables, then by command-line flags.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod report;

pub use error::{CliError, Result};

use commands::analyse::AnalyseArgs;
use commands::describe::DescribeArgs;
use commands::extremes::ExtremesArgs;
use config::EvaConfig;

/// Extreme value analysis of daily fatality counts
#[derive(Parser)]
#[command(name = "eva")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "eva.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis: extremes, GPD fit, KS test, VaR and ES
    Analyse(AnalyseArgs),

    /// List the declustered extremes only
    Extremes(ExtremesArgs),

    /// Preview the gap-filled series and its descriptive statistics
    Describe(DescribeArgs),

    /// Validate the configuration and print the effective values
    Check,
}

fn init_tracing(level: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = EvaConfig::load_or_default(&cli.config)?.with_env_override();

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.log_level.to_lowercase()
    };
    init_tracing(&level);
    tracing::debug!(config = %cli.config.display(), "Configuration loaded");

    match cli.command {
        Commands::Analyse(args) => commands::analyse::run(config, &args)?,
        Commands::Extremes(args) => commands::extremes::run(config, &args)?,
        Commands::Describe(args) => commands::describe::run(config, &args)?,
        Commands::Check => commands::check::run(&config, &cli.config)?,
    }
    Ok(())
}
