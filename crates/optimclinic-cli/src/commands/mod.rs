pub mod analyze;
pub mod cashflow;
pub mod metrics;
pub mod recommend;
pub mod scenarios;
