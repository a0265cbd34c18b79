use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, ScenarioFactors};
use crate::snapshot::FinancialSnapshot;
use crate::types::{Money, Rate};

/// Aggregate revenue and cost totals over the whole horizon. Absent series
/// contribute zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub revenue: Money,
    pub variable_costs: Money,
    pub fixed_costs: Money,
}

impl AggregateTotals {
    pub fn from_snapshot(snapshot: &FinancialSnapshot) -> Self {
        let total = |series: &Option<Vec<Money>>| {
            series
                .as_ref()
                .map_or(Decimal::ZERO, |s| s.iter().sum())
        };
        AggregateTotals {
            revenue: total(&snapshot.revenue),
            variable_costs: total(&snapshot.variable_costs),
            fixed_costs: total(&snapshot.fixed_costs),
        }
    }

    /// Base margin over the horizon: R − (V + F).
    pub fn margin(&self) -> Money {
        self.revenue - (self.variable_costs + self.fixed_costs)
    }
}

/// Aggregate projection for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub revenue: Money,
    pub variable_costs: Money,
    pub fixed_costs: Money,
    pub margin: Money,
    /// margin / revenue; absent when revenue is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_pct: Option<Rate>,
}

/// Base, optimistic and pessimistic aggregate projections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub base: ScenarioProjection,
    pub optimistic: ScenarioProjection,
    pub pessimistic: ScenarioProjection,
}

fn project(revenue: Money, variable_costs: Money, fixed_costs: Money) -> ScenarioProjection {
    let margin = revenue - (variable_costs + fixed_costs);
    let margin_pct = if revenue.is_zero() {
        None
    } else {
        Some(margin / revenue)
    };
    ScenarioProjection {
        revenue,
        variable_costs,
        fixed_costs,
        margin,
        margin_pct,
    }
}

fn apply(totals: &AggregateTotals, factors: &ScenarioFactors) -> ScenarioProjection {
    project(
        totals.revenue * factors.revenue,
        totals.variable_costs * factors.variable_costs,
        totals.fixed_costs * factors.fixed_costs,
    )
}

/// Derive the three-scenario table from the actual aggregate totals using
/// the configured multiplicative factors.
pub fn project_scenarios(totals: &AggregateTotals, config: &EngineConfig) -> ScenarioSet {
    ScenarioSet {
        base: project(totals.revenue, totals.variable_costs, totals.fixed_costs),
        optimistic: apply(totals, &config.optimistic),
        pessimistic: apply(totals, &config.pessimistic),
    }
}
