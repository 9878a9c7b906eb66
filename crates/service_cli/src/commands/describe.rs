//! Describe command implementation

use clap::Args;
use eva_core::math::stats::DescriptiveStats;

use super::{load_series, InputArgs};
use crate::config::EvaConfig;
use crate::report::text;
use crate::Result;

/// Arguments of `eva describe`.
#[derive(Args, Debug, Clone)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Rows shown at each end of the preview
    #[arg(short, long, default_value_t = text::PREVIEW_ROWS)]
    pub rows: usize,
}

/// Run the describe command
pub fn run(config: EvaConfig, args: &DescribeArgs) -> Result<()> {
    config.validate()?;
    let series = load_series(&args.input.input, &config.input)?;

    print!("{}", text::series_preview(&series, args.rows));
    if let Some(stats) = DescriptiveStats::from_values(series.values()) {
        println!();
        print!("{}", text::statistics(&stats));
    }
    Ok(())
}
