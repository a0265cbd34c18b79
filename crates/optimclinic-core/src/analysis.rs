use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::breakeven::{break_even_month, payback_month};
use crate::cash_need::{analyze_cash_need, CashNeedResult};
use crate::cashflow::{cumulative, derive_cashflow, CashflowResult, Provenance};
use crate::config::EngineConfig;
use crate::recommendations::{synthesize, RecommendationInputs, RecommendationSet};
use crate::scenarios::{project_scenarios, AggregateTotals, ScenarioSet};
use crate::sensitivity::{analyze_sensitivity, SensitivityResult};
use crate::snapshot::FinancialSnapshot;
use crate::types::{month_labels, with_metadata, ComputationOutput, Money};
use crate::value_metrics::{calculate_value_metrics, ValueMetrics};
use crate::OptimClinicResult;

/// Aggregates over the first twelve months, the headline row of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearOneSummary {
    /// How many months the summary actually covers (fewer than 12 on short
    /// horizons).
    pub months_covered: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebitda: Option<Money>,
    pub net_flow: Money,
}

/// Every metric the engine computes for one snapshot, in dataflow order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub cashflow: CashflowResult,
    pub cumulative: Vec<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_even_month: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_month: Option<usize>,
    pub metrics: ValueMetrics,
    pub cash_need: CashNeedResult,
    pub scenarios: ScenarioSet,
    pub sensitivity: SensitivityResult,
    pub recommendations: RecommendationSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_one: Option<YearOneSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_labels: Option<Vec<String>>,
}

fn year_one_summary(snapshot: &FinancialSnapshot, flows: &[Money]) -> Option<YearOneSummary> {
    if flows.is_empty() {
        return None;
    }
    let months = flows.len().min(12);
    let slice_sum = |series: &Option<Vec<Money>>| {
        series
            .as_ref()
            .map(|s| s[..months].iter().sum::<Decimal>())
    };
    Some(YearOneSummary {
        months_covered: months,
        revenue: slice_sum(&snapshot.revenue),
        ebitda: slice_sum(&snapshot.ebitda),
        net_flow: flows[..months].iter().sum(),
    })
}

/// Run the full single-shot analysis: derive the canonical cashflow series,
/// then every downstream metric, and close with the rule-based findings.
///
/// The snapshot is validated up front; everything after that degrades
/// gracefully, with fallback caveats reported as warnings on the envelope.
pub fn run_analysis(
    snapshot: &FinancialSnapshot,
    config: &EngineConfig,
) -> OptimClinicResult<ComputationOutput<AnalysisOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    snapshot.validate()?;

    let cashflow = derive_cashflow(snapshot)?;
    match cashflow.provenance {
        Provenance::EbitdaProxy => warnings.push(
            "No cost series supplied; EBITDA is standing in for operating cashflow".into(),
        ),
        Provenance::Modeled if snapshot.revenue.is_none() && snapshot.ebitda.is_none() => {
            warnings.push("No revenue or EBITDA series supplied; cashflow reflects costs only".into())
        }
        _ => {}
    }

    let annual_rate = match snapshot.annual_discount_rate {
        Some(rate) => rate,
        None => {
            warnings.push(format!(
                "No discount rate supplied; defaulting to {} annual",
                config.annual_discount_rate
            ));
            config.annual_discount_rate
        }
    };

    let cumulative_flows = cumulative(&cashflow.flows);
    let break_even = break_even_month(&cashflow.flows);
    let payback = payback_month(&cashflow.flows, snapshot.capex);
    let metrics = calculate_value_metrics(&cashflow.flows, snapshot.capex, annual_rate)?;
    let cash_need = analyze_cash_need(&cashflow.flows);

    let totals = AggregateTotals::from_snapshot(snapshot);
    let scenarios = project_scenarios(&totals, config);
    let sensitivity = analyze_sensitivity(&totals, config);

    let recommendations = synthesize(&RecommendationInputs {
        metrics: &metrics,
        cash_need: &cash_need,
        scenarios: &scenarios,
        sensitivity: &sensitivity,
        break_even_month: break_even,
        horizon: snapshot.horizon,
        ticket_price: snapshot.ticket_price,
        variable_cost_per_unit: snapshot.variable_cost_per_unit,
        revenue: snapshot.revenue.as_deref(),
    });

    let output = AnalysisOutput {
        year_one: year_one_summary(snapshot, &cashflow.flows),
        month_labels: snapshot
            .start_month
            .map(|d| month_labels(d, snapshot.horizon)),
        cashflow,
        cumulative: cumulative_flows,
        break_even_month: break_even,
        payback_month: payback,
        metrics,
        cash_need,
        scenarios,
        sensitivity,
        recommendations,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly cashflow forecast with DCF metrics and rule-based diagnostics",
        snapshot,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn clinic_snapshot() -> FinancialSnapshot {
        let mut s = FinancialSnapshot::new(12);
        s.revenue = Some(vec![dec!(1000); 12]);
        s.variable_costs = Some(vec![dec!(300); 12]);
        s.fixed_costs = Some(vec![dec!(400); 12]);
        s.capex = dec!(2000);
        s.annual_discount_rate = Some(dec!(0.10));
        s
    }

    #[test]
    fn test_full_analysis_dataflow() {
        let output = run_analysis(&clinic_snapshot(), &EngineConfig::default()).unwrap();
        let result = &output.result;

        assert_eq!(result.cashflow.provenance, Provenance::Modeled);
        assert_eq!(result.cashflow.flows, vec![dec!(300); 12]);
        assert_eq!(result.break_even_month, Some(1));
        assert_eq!(result.payback_month, Some(7));
        assert_eq!(result.metrics.roi, Some(dec!(0.80)));
        assert_eq!(result.cash_need.peak_need, Decimal::ZERO);
        assert_eq!(result.scenarios.base.margin, dec!(3600));
        assert_eq!(result.sensitivity.cases.len(), 4);
        assert!(!result.recommendations.findings.is_empty());
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_year_one_summary() {
        let output = run_analysis(&clinic_snapshot(), &EngineConfig::default()).unwrap();
        let year_one = output.result.year_one.unwrap();
        assert_eq!(year_one.months_covered, 12);
        assert_eq!(year_one.revenue, Some(dec!(12000)));
        assert_eq!(year_one.ebitda, None);
        assert_eq!(year_one.net_flow, dec!(3600));
    }

    #[test]
    fn test_default_discount_rate_is_disclosed() {
        let mut snapshot = clinic_snapshot();
        snapshot.annual_discount_rate = None;
        let output = run_analysis(&snapshot, &EngineConfig::default()).unwrap();
        assert!(output.warnings.iter().any(|w| w.contains("discount rate")));
    }

    #[test]
    fn test_ebitda_proxy_is_disclosed() {
        let mut snapshot = FinancialSnapshot::new(12);
        snapshot.ebitda = Some(vec![dec!(300); 12]);
        let output = run_analysis(&snapshot, &EngineConfig::default()).unwrap();
        assert_eq!(output.result.cashflow.provenance, Provenance::EbitdaProxy);
        assert!(output.warnings.iter().any(|w| w.contains("EBITDA")));
    }

    #[test]
    fn test_month_labels_follow_start_month() {
        let mut snapshot = clinic_snapshot();
        snapshot.start_month = chrono::NaiveDate::from_ymd_opt(2026, 10, 1);
        let output = run_analysis(&snapshot, &EngineConfig::default()).unwrap();
        let labels = output.result.month_labels.unwrap();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "2026-10");
        assert_eq!(labels[3], "2027-01");
    }

    #[test]
    fn test_empty_snapshot_degrades_gracefully() {
        let snapshot = FinancialSnapshot::new(0);
        let output = run_analysis(&snapshot, &EngineConfig::default()).unwrap();
        let result = &output.result;
        assert!(result.cashflow.flows.is_empty());
        assert_eq!(result.break_even_month, None);
        assert_eq!(result.cash_need.peak_need, Decimal::ZERO);
        assert_eq!(result.metrics.npv, None);
        assert!(result.year_one.is_none());
    }

    #[test]
    fn test_mismatched_series_fails_up_front() {
        let mut snapshot = clinic_snapshot();
        snapshot.debt_service = Some(vec![dec!(50); 6]);
        assert!(run_analysis(&snapshot, &EngineConfig::default()).is_err());
    }

    #[test]
    fn test_same_snapshot_same_result() {
        let snapshot = clinic_snapshot();
        let config = EngineConfig::default();
        let a = run_analysis(&snapshot, &config).unwrap();
        let b = run_analysis(&snapshot, &config).unwrap();
        assert_eq!(
            serde_json::to_value(&a.result).unwrap(),
            serde_json::to_value(&b.result).unwrap()
        );
    }
}
