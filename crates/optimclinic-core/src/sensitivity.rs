use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::scenarios::AggregateTotals;
use crate::types::Money;

/// A named single-variable perturbation of the aggregate margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lever {
    PriceUp,
    PriceDown,
    OccupancyUp,
    OccupancyDown,
}

impl Lever {
    /// Stable metric tag for recommendation findings.
    pub fn tag(&self) -> &'static str {
        match self {
            Lever::PriceUp => "sensitivity.price_up",
            Lever::PriceDown => "sensitivity.price_down",
            Lever::OccupancyUp => "sensitivity.occupancy_up",
            Lever::OccupancyDown => "sensitivity.occupancy_down",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Lever::PriceUp => "raising prices",
            Lever::PriceDown => "lowering prices",
            Lever::OccupancyUp => "filling more appointment slots",
            Lever::OccupancyDown => "losing appointment volume",
        }
    }
}

/// Margin outcome of one perturbation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityCase {
    pub lever: Lever,
    pub margin: Money,
    /// Perturbed margin minus the base margin.
    pub impact: Money,
}

/// The four-perturbation sensitivity table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityResult {
    pub base_margin: Money,
    pub cases: Vec<SensitivityCase>,
}

impl SensitivityResult {
    /// Cases ordered by absolute impact, largest first; ties keep the fixed
    /// price-before-occupancy case order so output is deterministic.
    pub fn top_levers(&self, count: usize) -> Vec<&SensitivityCase> {
        let mut ranked: Vec<&SensitivityCase> = self.cases.iter().collect();
        ranked.sort_by(|a, b| b.impact.abs().cmp(&a.impact.abs()));
        ranked.truncate(count);
        ranked
    }
}

/// Measure the margin impact of price and occupancy perturbations on the
/// aggregate totals. A pure price change leaves the cost base untouched; an
/// occupancy change scales variable costs with revenue, fixed costs never
/// move.
pub fn analyze_sensitivity(totals: &AggregateTotals, config: &EngineConfig) -> SensitivityResult {
    let base_margin = totals.margin();
    let one = Decimal::ONE;

    let price = |shift: Decimal| {
        totals.revenue * (one + shift) - (totals.variable_costs + totals.fixed_costs)
    };
    let occupancy = |shift: Decimal| {
        totals.revenue * (one + shift)
            - (totals.variable_costs * (one + shift) + totals.fixed_costs)
    };

    let cases = vec![
        (Lever::PriceUp, price(config.price_shift)),
        (Lever::PriceDown, price(-config.price_shift)),
        (Lever::OccupancyUp, occupancy(config.occupancy_shift)),
        (Lever::OccupancyDown, occupancy(-config.occupancy_shift)),
    ]
    .into_iter()
    .map(|(lever, margin)| SensitivityCase {
        lever,
        margin,
        impact: margin - base_margin,
    })
    .collect();

    SensitivityResult { base_margin, cases }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample_totals() -> AggregateTotals {
        AggregateTotals {
            revenue: dec!(12000),
            variable_costs: dec!(3600),
            fixed_costs: dec!(4800),
        }
    }

    #[test]
    fn test_price_up_leaves_cost_base_untouched() {
        let result = analyze_sensitivity(&sample_totals(), &EngineConfig::default());
        let case = &result.cases[0];
        assert_eq!(case.lever, Lever::PriceUp);
        // 12000*1.05 - (3600+4800) = 12600 - 8400 = 4200
        assert_eq!(case.margin, dec!(4200));
        assert_eq!(case.impact, dec!(600));
    }

    #[test]
    fn test_occupancy_scales_variable_costs() {
        let result = analyze_sensitivity(&sample_totals(), &EngineConfig::default());
        let up = result
            .cases
            .iter()
            .find(|c| c.lever == Lever::OccupancyUp)
            .unwrap();
        // 12000*1.10 - (3600*1.10 + 4800) = 13200 - 8760 = 4440
        assert_eq!(up.margin, dec!(4440));
        assert_eq!(up.impact, dec!(840));
    }

    #[test]
    fn test_impacts_are_symmetric_around_base() {
        let result = analyze_sensitivity(&sample_totals(), &EngineConfig::default());
        let price_up = result.cases[0].impact;
        let price_down = result.cases[1].impact;
        assert_eq!(price_up, -price_down);
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let totals = sample_totals();
        let config = EngineConfig::default();
        let a = analyze_sensitivity(&totals, &config);
        let b = analyze_sensitivity(&totals, &config);
        assert_eq!(a.base_margin, b.base_margin);
        for (ca, cb) in a.cases.iter().zip(b.cases.iter()) {
            assert_eq!(ca.margin, cb.margin);
            assert_eq!(ca.impact, cb.impact);
        }
    }

    #[test]
    fn test_top_levers_ranked_by_absolute_impact() {
        let result = analyze_sensitivity(&sample_totals(), &EngineConfig::default());
        let top = result.top_levers(2);
        assert_eq!(top.len(), 2);
        // Occupancy moves margin by 840 vs 600 for price.
        assert!(matches!(
            top[0].lever,
            Lever::OccupancyUp | Lever::OccupancyDown
        ));
        assert!(top[0].impact.abs() >= top[1].impact.abs());
    }
}
