use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::cash_need::CashNeedResult;
use crate::scenarios::ScenarioSet;
use crate::sensitivity::SensitivityResult;
use crate::types::{Money, Rate};
use crate::value_metrics::ValueMetrics;

const ROI_LOW: Decimal = dec!(0.10);
const ROI_COMPETITIVE: Decimal = dec!(0.15);
const MARGIN_WEAK: Decimal = dec!(0.30);
const MARGIN_STRONG: Decimal = dec!(0.35);
const CONTRIBUTION_FLOOR: Decimal = dec!(0.50);
const LATE_BREAK_EVEN_FRACTION: Decimal = dec!(0.75);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    Roi,
    Margin,
    Npv,
    Liquidity,
    Sensitivity,
    ContributionMargin,
    RevenueGrowth,
    BreakEven,
    DataCoverage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Positive,
    Neutral,
    Warning,
}

/// One qualitative diagnostic, tagged with the metric(s) that triggered it.
/// Numeric payloads travel in typed fields; the message stays plain prose
/// with no currency or percentage formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub category: FindingCategory,
    pub severity: Severity,
    pub message: String,
    pub triggered_by: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<usize>,
}

/// Ordered diagnostic findings. Never empty: when no rule can fire for lack
/// of data, a single data-coverage finding says so explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub findings: Vec<Finding>,
}

/// Everything the rules may consult. Each rule fires only when its required
/// inputs are present.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationInputs<'a> {
    pub metrics: &'a ValueMetrics,
    pub cash_need: &'a CashNeedResult,
    pub scenarios: &'a ScenarioSet,
    pub sensitivity: &'a SensitivityResult,
    pub break_even_month: Option<usize>,
    pub horizon: usize,
    pub ticket_price: Option<Money>,
    pub variable_cost_per_unit: Option<Money>,
    pub revenue: Option<&'a [Money]>,
}

/// Stateless rule evaluation over every computed metric.
pub fn synthesize(inputs: &RecommendationInputs) -> RecommendationSet {
    let mut findings = Vec::new();

    roi_rule(inputs.metrics, &mut findings);
    margin_rule(inputs.scenarios, &mut findings);
    npv_rule(inputs.metrics, &mut findings);
    liquidity_rule(inputs.cash_need, inputs.horizon, &mut findings);
    lever_rule(inputs.sensitivity, &mut findings);
    contribution_rule(
        inputs.ticket_price,
        inputs.variable_cost_per_unit,
        &mut findings,
    );
    growth_rule(inputs.revenue, &mut findings);
    break_even_rule(inputs.break_even_month, inputs.horizon, &mut findings);

    if findings.is_empty() {
        findings.push(Finding {
            category: FindingCategory::DataCoverage,
            severity: Severity::Neutral,
            message: "Insufficient data: no metric was computable from the supplied snapshot, \
                      so no diagnostic rule could be evaluated."
                .into(),
            triggered_by: vec![],
            value: None,
            month: None,
        });
    }

    RecommendationSet { findings }
}

fn roi_rule(metrics: &ValueMetrics, findings: &mut Vec<Finding>) {
    let Some(roi) = metrics.roi else { return };
    let (severity, message) = if roi < ROI_LOW {
        (
            Severity::Warning,
            "Return on investment is below the viability bar; pricing and occupancy need work \
             before committing capital.",
        )
    } else if roi < ROI_COMPETITIVE {
        (
            Severity::Neutral,
            "Return on investment is acceptable but improvable; a modest price or volume gain \
             would move it into competitive territory.",
        )
    } else {
        (
            Severity::Positive,
            "Return on investment is competitive for a private clinic project.",
        )
    };
    findings.push(Finding {
        category: FindingCategory::Roi,
        severity,
        message: message.into(),
        triggered_by: vec!["roi".into()],
        value: Some(roi),
        month: None,
    });
}

fn margin_rule(scenarios: &ScenarioSet, findings: &mut Vec<Finding>) {
    let Some(margin_pct) = scenarios.base.margin_pct else {
        return;
    };
    let (severity, message) = if margin_pct < MARGIN_WEAK {
        (
            Severity::Warning,
            "Operating margin is weak; review the cost base and treatment mix.",
        )
    } else if margin_pct < MARGIN_STRONG {
        (
            Severity::Neutral,
            "Operating margin is average for the sector.",
        )
    } else {
        (
            Severity::Positive,
            "Operating margin is strong; the cost structure supports reinvestment.",
        )
    };
    findings.push(Finding {
        category: FindingCategory::Margin,
        severity,
        message: message.into(),
        triggered_by: vec!["margin_pct".into()],
        value: Some(margin_pct),
        month: None,
    });
}

fn npv_rule(metrics: &ValueMetrics, findings: &mut Vec<Finding>) {
    let Some(npv) = metrics.npv else { return };
    let (severity, message) = if npv <= Decimal::ZERO {
        (
            Severity::Warning,
            "Net present value is not positive at the chosen discount rate; the plan's \
             assumptions need review.",
        )
    } else {
        (
            Severity::Positive,
            "The project is value-creating at the chosen discount rate.",
        )
    };
    findings.push(Finding {
        category: FindingCategory::Npv,
        severity,
        message: message.into(),
        triggered_by: vec!["npv".into()],
        value: Some(npv),
        month: None,
    });
}

fn liquidity_rule(cash_need: &CashNeedResult, horizon: usize, findings: &mut Vec<Finding>) {
    // With no months at all there is no cashflow to assess.
    if horizon == 0 {
        return;
    }
    if cash_need.peak_need > Decimal::ZERO {
        let message = match cash_need.trough_month {
            Some(month) => format!(
                "Liquidity risk: the cumulative cashflow digs a funding hole of {} that is \
                 deepest in month {month}; secure financing of at least that amount up front.",
                cash_need.peak_need
            ),
            None => format!(
                "Liquidity risk: the plan needs up-front funding of {}.",
                cash_need.peak_need
            ),
        };
        findings.push(Finding {
            category: FindingCategory::Liquidity,
            severity: Severity::Warning,
            message,
            triggered_by: vec!["peak_need".into(), "trough_month".into()],
            value: Some(cash_need.peak_need),
            month: cash_need.trough_month,
        });
    } else {
        findings.push(Finding {
            category: FindingCategory::Liquidity,
            severity: Severity::Positive,
            message: "Cash headroom is sufficient; the cumulative cashflow never dips below zero."
                .into(),
            triggered_by: vec!["peak_need".into()],
            value: Some(Decimal::ZERO),
            month: None,
        });
    }
}

fn lever_rule(sensitivity: &SensitivityResult, findings: &mut Vec<Finding>) {
    for case in sensitivity.top_levers(2) {
        if case.impact.is_zero() {
            continue;
        }
        findings.push(Finding {
            category: FindingCategory::Sensitivity,
            severity: Severity::Neutral,
            message: format!(
                "Priority lever: {} moves the aggregate margin by {}; plan for it explicitly.",
                case.lever.describe(),
                case.impact
            ),
            triggered_by: vec![case.lever.tag().into()],
            value: Some(case.impact),
            month: None,
        });
    }
}

fn contribution_rule(
    ticket_price: Option<Money>,
    variable_cost_per_unit: Option<Money>,
    findings: &mut Vec<Finding>,
) {
    let (Some(ticket), Some(unit_cost)) = (ticket_price, variable_cost_per_unit) else {
        return;
    };
    if ticket.is_zero() {
        return;
    }
    let ratio: Rate = (ticket - unit_cost) / ticket;
    let (severity, message) = if ratio < CONTRIBUTION_FLOOR {
        (
            Severity::Warning,
            "Each consultation keeps less than half its price after variable costs; raise the \
             ticket or renegotiate consumables.",
        )
    } else {
        (
            Severity::Positive,
            "Per-consultation economics are efficient; over half of each ticket covers fixed \
             costs and profit.",
        )
    };
    findings.push(Finding {
        category: FindingCategory::ContributionMargin,
        severity,
        message: message.into(),
        triggered_by: vec!["contribution_margin".into()],
        value: Some(ratio),
        month: None,
    });
}

fn growth_rule(revenue: Option<&[Money]>, findings: &mut Vec<Finding>) {
    let Some(revenue) = revenue else { return };
    if revenue.len() < 24 {
        return;
    }
    let year_one: Decimal = revenue[..12].iter().sum();
    let year_two: Decimal = revenue[12..24].iter().sum();
    if year_one.is_zero() {
        return;
    }
    let growth: Rate = (year_two - year_one) / year_one;
    let (severity, message) = if growth < Decimal::ZERO {
        (
            Severity::Warning,
            "Revenue shrinks from year one to year two; the ramp-up assumptions are inverted."
                .to_string(),
        )
    } else {
        (
            Severity::Positive,
            format!("Year-over-year revenue growth of {growth} underpins the plan."),
        )
    };
    findings.push(Finding {
        category: FindingCategory::RevenueGrowth,
        severity,
        message,
        triggered_by: vec!["revenue_growth_yoy".into()],
        value: Some(growth),
        month: None,
    });
}

fn break_even_rule(break_even_month: Option<usize>, horizon: usize, findings: &mut Vec<Finding>) {
    let Some(month) = break_even_month else { return };
    let late = Decimal::from(month as u64)
        > LATE_BREAK_EVEN_FRACTION * Decimal::from(horizon as u64);
    let (severity, message) = if late {
        (
            Severity::Warning,
            format!(
                "Cash break-even arrives late, in month {month} of {horizon}; little room is \
                 left for slippage."
            ),
        )
    } else {
        (
            Severity::Positive,
            format!("Cash break-even in month {month} is acceptable for the {horizon}-month plan."),
        )
    };
    findings.push(Finding {
        category: FindingCategory::BreakEven,
        severity,
        message,
        triggered_by: vec!["break_even_month".into()],
        value: None,
        month: Some(month),
    });
}
