use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::OptimClinicError;
use crate::types::{Money, Rate};
use crate::OptimClinicResult;

/// One month of operating data per entry, covering the whole projection
/// horizon. Series are whole-or-absent: a missing series triggers the
/// cashflow fallback chain instead of an error.
pub type MonthlySeries = Vec<Money>;

/// Caller-supplied monthly operating snapshot.
///
/// Created fresh per invocation and never mutated. Every series that is
/// present must have exactly `horizon` entries; [`FinancialSnapshot::validate`]
/// is the only place a hard failure is raised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// Number of months the projection covers.
    pub horizon: usize,
    /// Monthly revenue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<MonthlySeries>,
    /// Monthly variable costs (consumables, per-treatment medical fees).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_costs: Option<MonthlySeries>,
    /// Monthly fixed costs (rent, salaries, insurance).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_costs: Option<MonthlySeries>,
    /// Monthly debt service (interest plus principal).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_service: Option<MonthlySeries>,
    /// Monthly tax payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxes: Option<MonthlySeries>,
    /// Other monthly in/outflows (grants, one-off disposals); inflows positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_flows: Option<MonthlySeries>,
    /// Precomputed EBITDA, used as an operating-cashflow proxy when no cost
    /// detail is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebitda: Option<MonthlySeries>,
    /// Explicit net cashflow; short-circuits the derivation entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cashflow: Option<MonthlySeries>,
    /// Initial outlay at month 0 (equipment, fit-out). Sign is ignored.
    #[serde(default)]
    pub capex: Money,
    /// Annual discount rate; falls back to the engine config when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_discount_rate: Option<Rate>,
    /// First projection month, used only to generate display labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_month: Option<NaiveDate>,
    /// Average price charged per consultation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<Money>,
    /// Variable cost incurred per consultation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_cost_per_unit: Option<Money>,
}

impl FinancialSnapshot {
    /// An empty snapshot over the given horizon; series are filled in by the
    /// caller (or left absent to exercise the fallback chain).
    pub fn new(horizon: usize) -> Self {
        FinancialSnapshot {
            horizon,
            revenue: None,
            variable_costs: None,
            fixed_costs: None,
            debt_service: None,
            taxes: None,
            other_flows: None,
            ebitda: None,
            cashflow: None,
            capex: Decimal::ZERO,
            annual_discount_rate: None,
            start_month: None,
            ticket_price: None,
            variable_cost_per_unit: None,
        }
    }

    /// Every present series paired with its field name, for validation and
    /// error reporting.
    fn named_series(&self) -> [(&'static str, Option<&MonthlySeries>); 8] {
        [
            ("revenue", self.revenue.as_ref()),
            ("variable_costs", self.variable_costs.as_ref()),
            ("fixed_costs", self.fixed_costs.as_ref()),
            ("debt_service", self.debt_service.as_ref()),
            ("taxes", self.taxes.as_ref()),
            ("other_flows", self.other_flows.as_ref()),
            ("ebitda", self.ebitda.as_ref()),
            ("cashflow", self.cashflow.as_ref()),
        ]
    }

    /// Enforce the horizon invariant: every supplied series must have exactly
    /// `horizon` entries. Missing series are fine; mismatched lengths are the
    /// engine's only hard failure, reported with the offending field name.
    pub fn validate(&self) -> OptimClinicResult<()> {
        for (name, series) in self.named_series() {
            if let Some(s) = series {
                if s.len() != self.horizon {
                    return Err(OptimClinicError::SeriesLengthMismatch {
                        series: name.to_string(),
                        expected: self.horizon,
                        actual: s.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_accepts_missing_series() {
        let snapshot = FinancialSnapshot::new(12);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_validate_names_mismatched_series() {
        let mut snapshot = FinancialSnapshot::new(12);
        snapshot.revenue = Some(vec![dec!(1000); 12]);
        snapshot.taxes = Some(vec![dec!(50); 9]);

        let err = snapshot.validate().unwrap_err();
        match err {
            OptimClinicError::SeriesLengthMismatch {
                series,
                expected,
                actual,
            } => {
                assert_eq!(series, "taxes");
                assert_eq!(expected, 12);
                assert_eq!(actual, 9);
            }
            other => panic!("expected SeriesLengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_zero_horizon_rejects_nonempty_series() {
        let mut snapshot = FinancialSnapshot::new(0);
        snapshot.cashflow = Some(vec![dec!(100)]);
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let mut snapshot = FinancialSnapshot::new(3);
        snapshot.revenue = Some(vec![dec!(900), dec!(950), dec!(1000)]);
        snapshot.capex = dec!(2000);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: FinancialSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.horizon, 3);
        assert_eq!(back.revenue.unwrap()[2], dec!(1000));
        assert_eq!(back.capex, dec!(2000));
        assert!(back.variable_costs.is_none());
    }
}
