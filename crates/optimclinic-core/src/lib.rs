//! Financial forecasting engine for clinic business plans.
//!
//! Turns a monthly operating snapshot (revenue, costs, optional debt and tax
//! flows) into a net-cashflow series, break-even and payback timing,
//! discounted-value metrics (NPV/IRR/ROI), maximum funding need, scenario and
//! sensitivity tables, and rule-based recommendations.
//!
//! All computation is synchronous and pure: the same [`snapshot::FinancialSnapshot`]
//! always produces the same output, with no I/O and no shared state. Missing
//! input series are not errors; they trigger the cashflow fallback chain and
//! `Option` propagation downstream. The only hard failure is a series whose
//! length disagrees with the declared horizon.

pub mod analysis;
pub mod breakeven;
pub mod cash_need;
pub mod cashflow;
pub mod config;
pub mod error;
pub mod recommendations;
pub mod scenarios;
pub mod sensitivity;
pub mod snapshot;
pub mod types;
pub mod value_metrics;

pub use config::EngineConfig;
pub use error::OptimClinicError;
pub use snapshot::FinancialSnapshot;
pub use types::*;

/// Standard result type for all engine operations.
pub type OptimClinicResult<T> = Result<T, OptimClinicError>;
