//! Check command implementation
//!
//! Prints the effective configuration and validates it.

use std::path::Path;

use tracing::info;

use crate::config::EvaConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &EvaConfig, source: &Path) -> Result<()> {
    if source.exists() {
        println!("# Configuration file: {}", source.display());
    } else {
        println!("# No file at {}; using defaults", source.display());
    }
    print!("{}", config.to_toml()?);

    config.validate()?;
    info!("Configuration is valid");
    println!("# Configuration OK");
    Ok(())
}
