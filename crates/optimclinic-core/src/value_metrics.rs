use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::OptimClinicError;
use crate::types::{Money, Rate};
use crate::OptimClinicResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

// Newton-Raphson solver constants for the IRR root search.
const IRR_INITIAL_GUESS: Decimal = dec!(0.10);
const IRR_MAX_ITERATIONS: u32 = 50;
const IRR_STEP_TOLERANCE: Decimal = dec!(0.0000001);
const IRR_DERIVATIVE_FLOOR: Decimal = dec!(0.0000000001);
const IRR_RATE_FLOOR: Decimal = dec!(-0.9999);

/// Discounted-value metrics for the derived cashflow series.
///
/// Every field is nullable: an absent value is a data condition (empty
/// series, zero outlay, non-converging root search), never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueMetrics {
    /// (total net cashflow − outlay) / outlay; absent when capex is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi: Option<Rate>,
    /// Discounted operating flows less the undiscounted month-0 outlay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npv: Option<Money>,
    /// Monthly internal rate of return; absent when the root search fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irr_monthly: Option<Rate>,
    /// Monthly IRR annualized as (1+x)^12 − 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irr_annual: Option<Rate>,
}

/// Net present value of period-end flows: Σ flows[t] / (1+rate)^t for
/// t = 1..n. The month-0 outlay is *not* part of this sum; callers subtract
/// it undiscounted.
pub fn npv(period_rate: Rate, flows: &[Money]) -> OptimClinicResult<Money> {
    if period_rate <= dec!(-1) {
        return Err(OptimClinicError::InvalidInput {
            field: "period_rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let one_plus = Decimal::ONE + period_rate;
    let mut discount = Decimal::ONE;
    let mut total = Decimal::ZERO;

    for (t, flow) in flows.iter().enumerate() {
        discount *= one_plus;
        if discount.is_zero() {
            return Err(OptimClinicError::DivisionByZero {
                context: format!("NPV discount factor at month {}", t + 1),
            });
        }
        total += flow / discount;
    }

    Ok(total)
}

/// NPV and its derivative with respect to the rate, over a series whose
/// index 0 flow sits at t=0. Returns `None` when the arithmetic leaves the
/// representable range, which the solver treats as non-convergence.
fn npv_with_derivative(rate: Rate, flows: &[Money]) -> Option<(Decimal, Decimal)> {
    let one_plus = Decimal::ONE + rate;
    if one_plus <= Decimal::ZERO {
        return None;
    }

    let mut pow_t = Decimal::ONE; // (1+x)^t, starting at t=0
    let mut value = Decimal::ZERO;
    let mut derivative = Decimal::ZERO;

    for (t, flow) in flows.iter().enumerate() {
        if t > 0 {
            pow_t = pow_t.checked_mul(one_plus)?;
            if pow_t.is_zero() {
                return None;
            }
            let t_dec = Decimal::from(t as u64);
            derivative -= t_dec
                .checked_mul(*flow)?
                .checked_div(pow_t.checked_mul(one_plus)?)?;
        }
        value += flow.checked_div(pow_t)?;
    }

    Some((value, derivative))
}

/// Monthly internal rate of return via Newton-Raphson over
/// [−outlay, flows...]. `None` ("not converged") when the derivative
/// collapses, the iterate leaves the admissible range, or the step budget is
/// exhausted.
pub fn irr_monthly(flows_with_outlay: &[Money]) -> Option<Rate> {
    if flows_with_outlay.len() < 2 {
        return None;
    }

    let mut rate = IRR_INITIAL_GUESS;
    for _ in 0..IRR_MAX_ITERATIONS {
        let (value, derivative) = npv_with_derivative(rate, flows_with_outlay)?;
        if derivative.abs() < IRR_DERIVATIVE_FLOOR {
            return None;
        }
        let next = rate - value.checked_div(derivative)?;
        if next <= IRR_RATE_FLOOR {
            return None;
        }
        let step = (next - rate).abs();
        rate = next;
        if step < IRR_STEP_TOLERANCE {
            return Some(rate);
        }
    }
    None
}

/// Annualize a monthly rate: (1+x)^12 − 1. `None` on overflow.
pub fn annualize_monthly_rate(monthly: Rate) -> Option<Rate> {
    (Decimal::ONE + monthly)
        .checked_powd(MONTHS_PER_YEAR)
        .map(|p| p - Decimal::ONE)
}

/// Compute ROI, NPV and IRR for a monthly operating cashflow series against
/// a month-0 outlay. The annual discount rate is converted to a monthly rate
/// by simple division.
pub fn calculate_value_metrics(
    flows: &[Money],
    capex: Money,
    annual_discount_rate: Rate,
) -> OptimClinicResult<ValueMetrics> {
    if flows.is_empty() {
        return Ok(ValueMetrics {
            roi: None,
            npv: None,
            irr_monthly: None,
            irr_annual: None,
        });
    }

    let outlay = capex.abs();
    let monthly_rate = annual_discount_rate / MONTHS_PER_YEAR;

    let npv_value = npv(monthly_rate, flows)? - outlay;

    let roi = if outlay.is_zero() {
        None
    } else {
        let total: Decimal = flows.iter().sum();
        Some((total - outlay) / outlay)
    };

    let irr = if outlay.is_zero() {
        None
    } else {
        let mut with_outlay = Vec::with_capacity(flows.len() + 1);
        with_outlay.push(-outlay);
        with_outlay.extend_from_slice(flows);
        irr_monthly(&with_outlay)
    };
    let irr_annual = irr.and_then(annualize_monthly_rate);

    Ok(ValueMetrics {
        roi,
        npv: Some(npv_value),
        irr_monthly: irr,
        irr_annual,
    })
}
