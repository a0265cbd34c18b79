use clap::Args;
use serde_json::{json, Value};

use optimclinic_core::cashflow::{cumulative, derive_cashflow};

use crate::input;

/// Arguments for cashflow derivation
#[derive(Args)]
pub struct CashflowArgs {
    /// Path to a JSON snapshot file (or pipe JSON via stdin)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_cashflow(args: CashflowArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot = input::load_snapshot(&args.input)?;
    let result = derive_cashflow(&snapshot)?;
    let cumulative_flows = cumulative(&result.flows);

    Ok(json!({
        "provenance": result.provenance,
        "flows": result.flows,
        "cumulative": cumulative_flows,
    }))
}
