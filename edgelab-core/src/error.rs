//! Error taxonomy for the analysis engine.
//!
//! Every recoverable condition is a typed variant returned to the caller.
//! Undefined-but-valid outcomes (zero turnover, zero volatility, unbounded
//! capacity) are *not* errors — they are tagged variants on the result types
//! (`BreakEven`, `Capacity`, `Option<f64>` metric fields) so they survive
//! serialization without being coerced to 0, infinity, or NaN.

/// Recoverable analysis failures.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AnalysisError {
    /// Two series that must align one-to-one do not.
    /// Never silently truncates or pads.
    #[error("misaligned series ({context}): expected length {expected}, got {actual}")]
    MisalignedSeries {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Two series that must share timestamps one-to-one disagree on a date.
    #[error("misaligned series ({context}): dates differ at index {index}")]
    MisalignedDates {
        context: &'static str,
        index: usize,
    },

    /// Timestamps must be strictly increasing.
    #[error("non-monotonic timestamp at index {index}")]
    NonMonotonicTimestamps { index: usize },

    /// Position weights must be finite and within [-1, 1].
    #[error("invalid position weight {weight} at index {index} (must be finite, in [-1, 1])")]
    InvalidWeight { index: usize, weight: f64 },

    /// A trailing-window computation was requested with fewer observations
    /// than the window needs.
    #[error("insufficient history: need at least {required} observations, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    /// Hard precondition violation in a configuration record
    /// (negative coefficients, non-finite values).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_condition() {
        let e = AnalysisError::MisalignedSeries {
            context: "net_returns",
            expected: 10,
            actual: 9,
        };
        assert!(e.to_string().contains("misaligned"));

        let e = AnalysisError::InsufficientHistory {
            required: 20,
            actual: 5,
        };
        assert!(e.to_string().contains("insufficient history"));
    }
}
