use napi::Result as NapiResult;
use napi_derive::napi;

use optimclinic_core::{EngineConfig, FinancialSnapshot};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_snapshot(input_json: &str) -> NapiResult<FinancialSnapshot> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn parse_config(config_json: Option<String>) -> NapiResult<EngineConfig> {
    match config_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error),
        None => Ok(EngineConfig::default()),
    }
}

// ---------------------------------------------------------------------------
// Full analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn run_analysis(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let snapshot = parse_snapshot(&input_json)?;
    let config = parse_config(config_json)?;
    let output =
        optimclinic_core::analysis::run_analysis(&snapshot, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Individual engine operations
// ---------------------------------------------------------------------------

#[napi]
pub fn derive_cashflow(input_json: String) -> NapiResult<String> {
    let snapshot = parse_snapshot(&input_json)?;
    let output = optimclinic_core::cashflow::derive_cashflow(&snapshot).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn value_metrics(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let snapshot = parse_snapshot(&input_json)?;
    snapshot.validate().map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let cashflow =
        optimclinic_core::cashflow::derive_cashflow(&snapshot).map_err(to_napi_error)?;
    let annual_rate = snapshot
        .annual_discount_rate
        .unwrap_or(config.annual_discount_rate);
    let metrics = optimclinic_core::value_metrics::calculate_value_metrics(
        &cashflow.flows,
        snapshot.capex,
        annual_rate,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&metrics).map_err(to_napi_error)
}

#[napi]
pub fn project_scenarios(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let snapshot = parse_snapshot(&input_json)?;
    snapshot.validate().map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let totals = optimclinic_core::scenarios::AggregateTotals::from_snapshot(&snapshot);
    let output = optimclinic_core::scenarios::project_scenarios(&totals, &config);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_sensitivity(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let snapshot = parse_snapshot(&input_json)?;
    snapshot.validate().map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let totals = optimclinic_core::scenarios::AggregateTotals::from_snapshot(&snapshot);
    let output = optimclinic_core::sensitivity::analyze_sensitivity(&totals, &config);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn synthesize_recommendations(
    input_json: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let snapshot = parse_snapshot(&input_json)?;
    let config = parse_config(config_json)?;
    let output =
        optimclinic_core::analysis::run_analysis(&snapshot, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output.result.recommendations).map_err(to_napi_error)
}
