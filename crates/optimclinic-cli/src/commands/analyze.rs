use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use optimclinic_core::analysis::run_analysis;

use crate::input;

/// Arguments for the full analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to a JSON snapshot file (or pipe JSON via stdin)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON engine-config file (partial configs are filled with defaults)
    #[arg(long)]
    pub config: Option<String>,

    /// Override the snapshot's annual discount rate (e.g. 0.10 for 10%)
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    /// Override the snapshot's initial outlay
    #[arg(long)]
    pub capex: Option<Decimal>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut snapshot = input::load_snapshot(&args.input)?;
    let config = input::load_config(&args.config)?;

    if let Some(rate) = args.discount_rate {
        snapshot.annual_discount_rate = Some(rate);
    }
    if let Some(capex) = args.capex {
        snapshot.capex = capex;
    }

    let output = run_analysis(&snapshot, &config)?;
    Ok(serde_json::to_value(&output)?)
}
