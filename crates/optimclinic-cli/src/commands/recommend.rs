use clap::Args;
use serde_json::{json, Value};

use optimclinic_core::analysis::run_analysis;

use crate::input;

/// Arguments for recommendation synthesis
#[derive(Args)]
pub struct RecommendArgs {
    /// Path to a JSON snapshot file (or pipe JSON via stdin)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON engine-config file
    #[arg(long)]
    pub config: Option<String>,
}

pub fn run_recommend(args: RecommendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot = input::load_snapshot(&args.input)?;
    let config = input::load_config(&args.config)?;

    let output = run_analysis(&snapshot, &config)?;
    Ok(json!({
        "findings": output.result.recommendations.findings,
        "warnings": output.warnings,
    }))
}
