use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates and percentages expressed as fractions (0.05 = 5%). Never as ×100 values.
pub type Rate = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata attached to every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Wrap a computation result in the standard envelope.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "decimal_128bit".to_string(),
        },
    }
}

/// Display labels ("2026-01", "2026-02", ...) for each month of the horizon,
/// starting at `start`. Day-of-month is ignored.
pub fn month_labels(start: NaiveDate, months: usize) -> Vec<String> {
    let mut labels = Vec::with_capacity(months);
    let mut year = start.year();
    let mut month = start.month();
    for _ in 0..months {
        labels.push(format!("{year:04}-{month:02}"));
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_labels_roll_over_year_end() {
        let start = NaiveDate::from_ymd_opt(2026, 11, 15).unwrap();
        let labels = month_labels(start, 4);
        assert_eq!(labels, vec!["2026-11", "2026-12", "2027-01", "2027-02"]);
    }

    #[test]
    fn test_month_labels_empty_horizon() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(month_labels(start, 0).is_empty());
    }
}
