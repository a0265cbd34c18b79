use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use optimclinic_core::breakeven::{break_even_month, payback_month};
use optimclinic_core::cash_need::analyze_cash_need;
use optimclinic_core::cashflow::derive_cashflow;
use optimclinic_core::value_metrics::calculate_value_metrics;
use optimclinic_core::EngineConfig;

use crate::input;

/// Arguments for the headline metric set
#[derive(Args)]
pub struct MetricsArgs {
    /// Path to a JSON snapshot file (or pipe JSON via stdin)
    #[arg(long)]
    pub input: Option<String>,

    /// Override the snapshot's annual discount rate (e.g. 0.10 for 10%)
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    /// Override the snapshot's initial outlay
    #[arg(long)]
    pub capex: Option<Decimal>,
}

pub fn run_metrics(args: MetricsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut snapshot = input::load_snapshot(&args.input)?;
    if let Some(capex) = args.capex {
        snapshot.capex = capex;
    }

    let rate = args
        .discount_rate
        .or(snapshot.annual_discount_rate)
        .unwrap_or(EngineConfig::default().annual_discount_rate);

    let cashflow = derive_cashflow(&snapshot)?;
    let metrics = calculate_value_metrics(&cashflow.flows, snapshot.capex, rate)?;
    let cash_need = analyze_cash_need(&cashflow.flows);

    Ok(json!({
        "metrics": metrics,
        "break_even_month": break_even_month(&cashflow.flows),
        "payback_month": payback_month(&cashflow.flows, snapshot.capex),
        "cash_need": cash_need,
        "provenance": cashflow.provenance,
    }))
}
