//! Extremes command implementation
//!
//! Lists the declustered peaks over threshold without fitting a model.

use clap::Args;
use eva_risk::analysis::EvaAnalysis;
use tracing::info;

use super::{load_series, InputArgs, PotArgs};
use crate::config::EvaConfig;
use crate::report::text;
use crate::Result;

/// Arguments of `eva extremes`.
#[derive(Args, Debug, Clone)]
pub struct ExtremesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub pot: PotArgs,
}

/// Run the extremes command
pub fn run(mut config: EvaConfig, args: &ExtremesArgs) -> Result<()> {
    args.pot.apply(&mut config.analysis);
    config.validate()?;

    let series = load_series(&args.input.input, &config.input)?;
    let extremes = EvaAnalysis::new(config.analysis).extract(&series)?;
    info!(count = extremes.len(), "Extremes extracted");

    print!("{}", text::extremes_table(&extremes, series.max()));
    Ok(())
}
