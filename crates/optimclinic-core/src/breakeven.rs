use rust_decimal::Decimal;

use crate::types::Money;

/// First month (1-based) where the cumulative cashflow is non-negative.
///
/// The comparison is exact on the values as given; no tolerance. `None` means
/// break-even is not reached within the horizon (or the series is empty).
pub fn break_even_month(flows: &[Money]) -> Option<usize> {
    let mut running = Decimal::ZERO;
    for (i, flow) in flows.iter().enumerate() {
        running += flow;
        if running >= Decimal::ZERO {
            return Some(i + 1);
        }
    }
    None
}

/// First month (1-based) where the cumulative cashflow covers the initial
/// outlay. Distinct from [`break_even_month`], which compares against zero.
/// `None` when the outlay is zero or never recovered.
pub fn payback_month(flows: &[Money], capex: Money) -> Option<usize> {
    let target = capex.abs();
    if target.is_zero() {
        return None;
    }
    let mut running = Decimal::ZERO;
    for (i, flow) in flows.iter().enumerate() {
        running += flow;
        if running >= target {
            return Some(i + 1);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_break_even_first_non_negative_prefix() {
        let flows = vec![dec!(-500), dec!(200), dec!(300), dec!(100)];
        // cumulative: -500, -300, 0, 100
        assert_eq!(break_even_month(&flows), Some(3));
    }

    #[test]
    fn test_break_even_month_one_when_first_flow_positive() {
        let flows = vec![dec!(300); 12];
        assert_eq!(break_even_month(&flows), Some(1));
    }

    #[test]
    fn test_break_even_exact_zero_counts() {
        let flows = vec![dec!(-100), dec!(100)];
        assert_eq!(break_even_month(&flows), Some(2));
    }

    #[test]
    fn test_break_even_not_reached() {
        let flows = vec![dec!(-100), dec!(20), dec!(30)];
        assert_eq!(break_even_month(&flows), None);
    }

    #[test]
    fn test_break_even_empty_series() {
        assert_eq!(break_even_month(&[]), None);
    }

    #[test]
    fn test_payback_differs_from_break_even() {
        // 300/month against a 2000 outlay: break-even is month 1 (the
        // cumulative is never negative); payback waits for 2000 at month 7.
        let flows = vec![dec!(300); 12];
        assert_eq!(break_even_month(&flows), Some(1));
        assert_eq!(payback_month(&flows, dec!(2000)), Some(7));
    }

    #[test]
    fn test_payback_uses_outlay_magnitude() {
        let flows = vec![dec!(600); 4];
        assert_eq!(payback_month(&flows, dec!(-1200)), Some(2));
    }

    #[test]
    fn test_payback_none_without_outlay() {
        let flows = vec![dec!(300); 12];
        assert_eq!(payback_month(&flows, Decimal::ZERO), None);
    }

    #[test]
    fn test_payback_never_recovered() {
        let flows = vec![dec!(100); 6];
        assert_eq!(payback_month(&flows, dec!(10000)), None);
    }
}
