//! Typed errors for the analysis core.
//!
//! Every fallible operation fails fast with one of these variants.
//! Numeric degeneracies that have a documented neutral fallback
//! (constant-series correlation, empty sentiment aggregation, the 0.5
//! neutral prior) do not error; everything else does. NaN and Infinity
//! never escape a public function.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Input slice was empty where at least one value is required.
    #[error("input is empty")]
    EmptyInput,

    /// Paired inputs must have the same length.
    #[error("input lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Below the minimum sample size for the requested statistic.
    #[error("insufficient data: need at least {required} samples, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Below the minimum entity count for a pairwise analysis.
    #[error("insufficient entities: need at least {required}, got {actual}")]
    InsufficientEntities { required: usize, actual: usize },

    /// Zero variance or zero denominator where the result is undefined.
    #[error("degenerate input: {0}")]
    DegenerateInput(&'static str),

    /// Parameter outside the supported range or set.
    #[error("unsupported parameter: {0}")]
    UnsupportedParameter(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
