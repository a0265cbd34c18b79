use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Maximum funding shortfall over the horizon and when it occurs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashNeedResult {
    /// Depth of the deepest cumulative trough, reported as a non-negative
    /// funding amount. Zero when the cumulative series never dips below zero.
    pub peak_need: Money,
    /// 1-based month of the cumulative minimum; absent when there is no
    /// shortfall at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trough_month: Option<usize>,
}

/// Walk the cumulative series and find the deepest shortfall. The trough
/// month is the first month the minimum is reached.
pub fn analyze_cash_need(flows: &[Money]) -> CashNeedResult {
    let mut running = Decimal::ZERO;
    let mut minimum = Decimal::ZERO;
    let mut trough_month = None;

    for (i, flow) in flows.iter().enumerate() {
        running += flow;
        if running < minimum {
            minimum = running;
            trough_month = Some(i + 1);
        }
    }

    CashNeedResult {
        // abs() rather than negation so a no-shortfall result is an unsigned
        // zero in serialized output.
        peak_need: minimum.abs(),
        trough_month,
    }
}
