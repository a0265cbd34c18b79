use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::snapshot::{FinancialSnapshot, MonthlySeries};
use crate::types::Money;
use crate::OptimClinicResult;

/// Which fallback path produced a derived cashflow series.
///
/// Upstream data is frequently incomplete; the engine degrades gracefully but
/// discloses the assumption so the narrative layer can caveat it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// Caller supplied the net cashflow directly; returned verbatim.
    Explicit,
    /// Built from revenue minus cost/debt/tax components, absent ones as zero.
    Modeled,
    /// No cost detail at all; EBITDA stood in for operating cashflow.
    EbitdaProxy,
}

/// The canonical monthly net-cashflow series plus its provenance tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowResult {
    pub flows: MonthlySeries,
    pub provenance: Provenance,
}

fn component(series: Option<&MonthlySeries>, month: usize) -> Money {
    series.map_or(Decimal::ZERO, |s| s[month])
}

/// Derive the canonical net-cashflow series from whatever subset of inputs
/// the snapshot carries. First match wins:
///
/// 1. an explicit `cashflow` series is returned verbatim;
/// 2. with no cost series at all but EBITDA present, EBITDA stands in for
///    operating cashflow (less debt service and taxes, plus other flows);
/// 3. otherwise the component model, treating absent series as zero.
pub fn derive_cashflow(snapshot: &FinancialSnapshot) -> OptimClinicResult<CashflowResult> {
    snapshot.validate()?;

    if let Some(flows) = &snapshot.cashflow {
        return Ok(CashflowResult {
            flows: flows.clone(),
            provenance: Provenance::Explicit,
        });
    }

    let no_cost_detail = snapshot.variable_costs.is_none() && snapshot.fixed_costs.is_none();
    if no_cost_detail {
        if let Some(ebitda) = &snapshot.ebitda {
            let flows = (0..snapshot.horizon)
                .map(|m| {
                    ebitda[m] - component(snapshot.debt_service.as_ref(), m)
                        - component(snapshot.taxes.as_ref(), m)
                        + component(snapshot.other_flows.as_ref(), m)
                })
                .collect();
            return Ok(CashflowResult {
                flows,
                provenance: Provenance::EbitdaProxy,
            });
        }
    }

    let flows = (0..snapshot.horizon)
        .map(|m| {
            component(snapshot.revenue.as_ref(), m)
                - component(snapshot.variable_costs.as_ref(), m)
                - component(snapshot.fixed_costs.as_ref(), m)
                - component(snapshot.debt_service.as_ref(), m)
                - component(snapshot.taxes.as_ref(), m)
                + component(snapshot.other_flows.as_ref(), m)
        })
        .collect();

    Ok(CashflowResult {
        flows,
        provenance: Provenance::Modeled,
    })
}

/// Running prefix sums of a cashflow series, month by month.
pub fn cumulative(flows: &[Money]) -> Vec<Money> {
    let mut running = Decimal::ZERO;
    flows
        .iter()
        .map(|f| {
            running += f;
            running
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn modeled_snapshot() -> FinancialSnapshot {
        let mut s = FinancialSnapshot::new(3);
        s.revenue = Some(vec![dec!(1000); 3]);
        s.variable_costs = Some(vec![dec!(300); 3]);
        s.fixed_costs = Some(vec![dec!(400); 3]);
        s
    }

    #[test]
    fn test_explicit_series_short_circuits() {
        let mut s = modeled_snapshot();
        s.cashflow = Some(vec![dec!(111), dec!(222), dec!(333)]);

        let result = derive_cashflow(&s).unwrap();
        assert_eq!(result.provenance, Provenance::Explicit);
        assert_eq!(result.flows, vec![dec!(111), dec!(222), dec!(333)]);
    }

    #[test]
    fn test_modeled_with_all_components() {
        let mut s = modeled_snapshot();
        s.debt_service = Some(vec![dec!(50); 3]);
        s.taxes = Some(vec![dec!(25); 3]);
        s.other_flows = Some(vec![dec!(10); 3]);

        let result = derive_cashflow(&s).unwrap();
        assert_eq!(result.provenance, Provenance::Modeled);
        // 1000 - 300 - 400 - 50 - 25 + 10
        assert_eq!(result.flows, vec![dec!(235); 3]);
    }

    #[test]
    fn test_absent_components_treated_as_zero() {
        let mut s = FinancialSnapshot::new(2);
        s.revenue = Some(vec![dec!(800), dec!(900)]);
        s.fixed_costs = Some(vec![dec!(500), dec!(500)]);

        let result = derive_cashflow(&s).unwrap();
        assert_eq!(result.provenance, Provenance::Modeled);
        assert_eq!(result.flows, vec![dec!(300), dec!(400)]);
    }

    #[test]
    fn test_ebitda_proxy_when_no_cost_detail() {
        let mut s = FinancialSnapshot::new(3);
        s.revenue = Some(vec![dec!(1000); 3]);
        s.ebitda = Some(vec![dec!(300); 3]);
        s.debt_service = Some(vec![dec!(40); 3]);

        let result = derive_cashflow(&s).unwrap();
        assert_eq!(result.provenance, Provenance::EbitdaProxy);
        assert_eq!(result.flows, vec![dec!(260); 3]);
    }

    #[test]
    fn test_any_cost_series_disables_ebitda_proxy() {
        let mut s = FinancialSnapshot::new(2);
        s.revenue = Some(vec![dec!(1000); 2]);
        s.ebitda = Some(vec![dec!(300); 2]);
        s.fixed_costs = Some(vec![dec!(600); 2]);

        let result = derive_cashflow(&s).unwrap();
        assert_eq!(result.provenance, Provenance::Modeled);
        assert_eq!(result.flows, vec![dec!(400); 2]);
    }

    #[test]
    fn test_empty_horizon_yields_empty_series() {
        let s = FinancialSnapshot::new(0);
        let result = derive_cashflow(&s).unwrap();
        assert_eq!(result.provenance, Provenance::Modeled);
        assert!(result.flows.is_empty());
    }

    #[test]
    fn test_length_mismatch_is_a_hard_failure() {
        let mut s = modeled_snapshot();
        s.revenue = Some(vec![dec!(1000); 5]);
        assert!(derive_cashflow(&s).is_err());
    }

    #[test]
    fn test_cumulative_prefix_sums() {
        let flows = vec![dec!(-100), dec!(40), dec!(80)];
        assert_eq!(cumulative(&flows), vec![dec!(-100), dec!(-60), dec!(20)]);
    }
}
