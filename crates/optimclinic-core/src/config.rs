use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Rate;

/// Multiplicative factors applied to the base aggregates for a derived scenario.
///
/// Revenue and variable costs move together with volume; fixed costs drift
/// only slightly because they are largely volume-insensitive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScenarioFactors {
    pub revenue: Rate,
    pub variable_costs: Rate,
    pub fixed_costs: Rate,
}

/// Tunable engine assumptions.
///
/// Defaults carry over the constants from the original planning tool: 10%
/// annual discount rate, ±5% price and ±10% occupancy perturbations, and
/// 1.02/0.98 fixed-cost drift for the derived scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Annual discount rate used when the snapshot does not declare one.
    pub annual_discount_rate: Rate,
    /// Magnitude of the price perturbation in the sensitivity table.
    pub price_shift: Rate,
    /// Magnitude of the occupancy perturbation in the sensitivity table.
    pub occupancy_shift: Rate,
    /// Factors for the optimistic scenario.
    pub optimistic: ScenarioFactors,
    /// Factors for the pessimistic scenario.
    pub pessimistic: ScenarioFactors,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            annual_discount_rate: dec!(0.10),
            price_shift: dec!(0.05),
            occupancy_shift: dec!(0.10),
            optimistic: ScenarioFactors {
                revenue: dec!(1.10),
                variable_costs: dec!(1.10),
                fixed_costs: dec!(1.02),
            },
            pessimistic: ScenarioFactors {
                revenue: dec!(0.90),
                variable_costs: dec!(0.90),
                fixed_costs: dec!(0.98),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_json_fills_defaults() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"annual_discount_rate": "0.08"}"#).unwrap();
        assert_eq!(cfg.annual_discount_rate, dec!(0.08));
        assert_eq!(cfg.price_shift, dec!(0.05));
        assert_eq!(cfg.optimistic.fixed_costs, dec!(1.02));
    }
}
