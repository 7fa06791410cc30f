//! Descriptive statistics over a player's performance history.

use crate::error::{AnalysisError, Result};
use crate::stats;
use crate::types::{Sample, StatisticalSummary};

/// Minimum history length for a meaningful summary.
const MIN_SAMPLES: usize = 2;

/// Default anomaly sensitivity in standard deviations.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 1.5;

/// Summarize a performance history: mean, median, sample standard
/// deviation and volatility (coefficient of variation, percent).
///
/// A zero-mean history makes volatility undefined and fails with
/// `DegenerateInput` rather than returning Infinity.
pub fn summarize(samples: &[Sample]) -> Result<StatisticalSummary> {
    if samples.len() < MIN_SAMPLES {
        return Err(AnalysisError::InsufficientData {
            required: MIN_SAMPLES,
            actual: samples.len(),
        });
    }

    let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
    let mean = stats::mean(&values)?;
    let median = stats::median(&values)?;
    let std_dev = stats::std_dev(&values)?;

    if mean.abs() < f64::EPSILON {
        return Err(AnalysisError::DegenerateInput(
            "volatility is undefined for a zero-mean history",
        ));
    }
    let volatility_pct = (std_dev / mean).abs() * 100.0;

    Ok(StatisticalSummary {
        mean,
        median,
        std_dev,
        volatility_pct,
    })
}

/// Performances further than `threshold * std_dev` from the mean.
///
/// A constant history has zero deviation and therefore no anomalies.
pub fn detect_anomalies(samples: &[Sample], threshold: f64) -> Result<Vec<Sample>> {
    if threshold <= 0.0 {
        return Err(AnalysisError::UnsupportedParameter(format!(
            "anomaly threshold must be positive, got {threshold}"
        )));
    }
    let summary = summarize(samples)?;
    Ok(samples
        .iter()
        .filter(|s| (s.value - summary.mean).abs() > threshold * summary.std_dev)
        .copied()
        .collect())
}
