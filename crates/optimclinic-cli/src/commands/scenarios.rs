use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use optimclinic_core::scenarios::{project_scenarios, AggregateTotals};
use optimclinic_core::sensitivity::analyze_sensitivity;

use crate::input;

/// Arguments for scenario projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScenariosArgs {
    /// Aggregate revenue over the horizon
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Aggregate variable costs over the horizon
    #[arg(long)]
    pub variable_costs: Option<Decimal>,

    /// Aggregate fixed costs over the horizon
    #[arg(long)]
    pub fixed_costs: Option<Decimal>,

    /// Path to a JSON snapshot file; totals are aggregated from its series
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON engine-config file
    #[arg(long)]
    pub config: Option<String>,
}

/// Arguments for sensitivity analysis (same totals as `scenarios`)
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SensitivityArgs {
    /// Aggregate revenue over the horizon
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Aggregate variable costs over the horizon
    #[arg(long)]
    pub variable_costs: Option<Decimal>,

    /// Aggregate fixed costs over the horizon
    #[arg(long)]
    pub fixed_costs: Option<Decimal>,

    /// Path to a JSON snapshot file; totals are aggregated from its series
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON engine-config file
    #[arg(long)]
    pub config: Option<String>,
}

fn resolve_totals(
    revenue: Option<Decimal>,
    variable_costs: Option<Decimal>,
    fixed_costs: Option<Decimal>,
    input_path: &Option<String>,
) -> Result<AggregateTotals, Box<dyn std::error::Error>> {
    if let Some(revenue) = revenue {
        return Ok(AggregateTotals {
            revenue,
            variable_costs: variable_costs.unwrap_or(Decimal::ZERO),
            fixed_costs: fixed_costs.unwrap_or(Decimal::ZERO),
        });
    }

    let snapshot = input::load_snapshot(input_path)
        .map_err(|e| format!("either pass --revenue or provide a snapshot ({e})"))?;
    snapshot.validate()?;
    Ok(AggregateTotals::from_snapshot(&snapshot))
}

pub fn run_scenarios(args: ScenariosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let totals = resolve_totals(
        args.revenue,
        args.variable_costs,
        args.fixed_costs,
        &args.input,
    )?;
    let config = input::load_config(&args.config)?;
    let set = project_scenarios(&totals, &config);
    Ok(serde_json::to_value(&set)?)
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let totals = resolve_totals(
        args.revenue,
        args.variable_costs,
        args.fixed_costs,
        &args.input,
    )?;
    let config = input::load_config(&args.config)?;
    let result = analyze_sensitivity(&totals, &config);
    Ok(serde_json::to_value(&result)?)
}
