//! Statistical primitives shared by every analyzer.
//!
//! All functions are pure and stateless. Empty or mismatched inputs
//! fail with a typed error rather than returning a silent 0; the one
//! deliberate neutral fallback is `pearson_correlation` returning 0.0
//! for a constant (zero variance) series.

use crate::error::{AnalysisError, Result};

/// Z-scores for the supported confidence levels.
const Z_SCORES: &[(f64, f64)] = &[(0.80, 1.282), (0.90, 1.645), (0.95, 1.960), (0.99, 2.576)];

/// Tolerance below which a denominator is treated as zero.
const EPSILON: f64 = 1e-12;

/// Arithmetic mean.
///
/// Errors with `EmptyInput` for an empty slice. Callers that want a
/// neutral default must supply it themselves.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; averages the middle pair for even-length input.
pub fn median(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 != 0 {
        Ok(sorted[mid])
    } else {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Sample standard deviation (n - 1 denominator).
///
/// The n - 1 denominator is used everywhere in this crate; call sites
/// must not assume the population form.
pub fn std_dev(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            required: 2,
            actual: values.len(),
        });
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Ok(variance.sqrt())
}

/// Trailing moving average with an asymmetric window at the start.
///
/// Index `i` averages the up-to-`window` values ending at `i`, so the
/// output has the same length as the input and early indices average
/// whatever history exists. A window of 1 is the identity.
pub fn moving_average(values: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(AnalysisError::UnsupportedParameter(
            "moving average window must be at least 1".to_string(),
        ));
    }
    if values.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    Ok((0..values.len())
        .map(|i| {
            let start = i.saturating_sub(window - 1);
            let slice = &values[start..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect())
}

/// Pearson correlation coefficient.
///
/// Symmetric in its arguments and always within [-1, 1]. A constant
/// series has no defined correlation; 0.0 is returned as the
/// documented neutral value rather than an error, since correlation
/// matrices routinely contain flat series.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Result<f64> {
    if xs.len() != ys.len() {
        return Err(AnalysisError::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    if xs.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let n = xs.len() as f64;
    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_x_sq: f64 = xs.iter().map(|x| x * x).sum();
    let sum_y_sq: f64 = ys.iter().map(|y| y * y).sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator =
        ((n * sum_x_sq - sum_x * sum_x) * (n * sum_y_sq - sum_y * sum_y)).sqrt();

    if denominator < EPSILON {
        return Ok(0.0);
    }
    Ok((numerator / denominator).clamp(-1.0, 1.0))
}

/// Bayesian posterior update from a prior and a product of likelihoods.
///
/// posterior = p * prod(L) / (p * prod(L) + (1 - p))
///
/// Errors with `DegenerateInput` when the denominator collapses to
/// zero (prior 0 with zero likelihood product) instead of producing
/// NaN.
pub fn bayesian_update(prior: f64, likelihoods: &[f64]) -> Result<f64> {
    if !(0.0..=1.0).contains(&prior) {
        return Err(AnalysisError::UnsupportedParameter(format!(
            "prior probability must be in [0, 1], got {prior}"
        )));
    }
    if let Some(bad) = likelihoods.iter().find(|l| **l < 0.0) {
        return Err(AnalysisError::UnsupportedParameter(format!(
            "likelihood must be non-negative, got {bad}"
        )));
    }

    let total_likelihood: f64 = likelihoods.iter().product();
    let numerator = prior * total_likelihood;
    let denominator = numerator + (1.0 - prior);

    if denominator < EPSILON {
        return Err(AnalysisError::DegenerateInput(
            "bayesian update denominator is zero",
        ));
    }
    Ok(numerator / denominator)
}

/// Gaussian-approximation confidence interval around a mean.
///
/// Supports levels 0.80, 0.90, 0.95 and 0.99 via a z-score lookup;
/// anything else is `UnsupportedParameter`. The standard error uses
/// the supplied sample size.
pub fn confidence_interval(
    mean: f64,
    std_dev: f64,
    level: f64,
    sample_size: usize,
) -> Result<(f64, f64)> {
    if sample_size == 0 {
        return Err(AnalysisError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    let z = Z_SCORES
        .iter()
        .find(|(l, _)| (l - level).abs() < 1e-9)
        .map(|(_, z)| *z)
        .ok_or_else(|| {
            AnalysisError::UnsupportedParameter(format!(
                "confidence level {level} not supported (use 0.80, 0.90, 0.95 or 0.99)"
            ))
        })?;

    let standard_error = std_dev / (sample_size as f64).sqrt();
    Ok((mean - z * standard_error, mean + z * standard_error))
}
