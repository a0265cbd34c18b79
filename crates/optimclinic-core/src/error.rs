use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimClinicError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Series length mismatch: {series} has {actual} entries, horizon is {expected} months")]
    SeriesLengthMismatch {
        series: String,
        expected: usize,
        actual: usize,
    },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for OptimClinicError {
    fn from(e: serde_json::Error) -> Self {
        OptimClinicError::SerializationError(e.to_string())
    }
}
