//! Ensemble trend forecasting over a player's performance history.
//!
//! Three cheap forecasters (linear regression, seasonal-factor
//! extrapolation, exponential smoothing) are averaged into one
//! forecast. The confidence interval is mean +/- 1.96 * std dev of the
//! history, a spread measure rather than a forecast-error interval.

use serde::{Deserialize, Serialize};

use crate::analysis::{summary, timeseries};
use crate::error::{AnalysisError, Result};
use crate::types::{Sample, StatisticalSummary, TrendSummary};

/// Minimum history length for an ensemble forecast.
pub const MIN_HISTORY: usize = 5;

/// Smoothing factor for the exponential-smoothing member.
const SMOOTHING_ALPHA: f64 = 0.3;

/// Z-score for the 95% interval around the mean.
const INTERVAL_Z: f64 = 1.96;

/// Previous values smaller than this are skipped when estimating the
/// seasonal ratio.
const RATIO_EPSILON: f64 = 1e-9;

/// Ensemble forecast output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendForecastModel {
    pub player: String,
    pub trend: TrendSummary,
    pub statistics: StatisticalSummary,
    /// Averaged forecast across the three methods.
    pub forecast: Vec<f64>,
    /// mean +/- 1.96 * std_dev of the history.
    pub confidence_interval: (f64, f64),
}

/// Forecast a player's trend over `periods` future games.
pub fn forecast_player_trends(
    player: &str,
    history: &[Sample],
    periods: usize,
) -> Result<TrendForecastModel> {
    if periods == 0 {
        return Err(AnalysisError::UnsupportedParameter(
            "forecast periods must be at least 1".to_string(),
        ));
    }
    if history.len() < MIN_HISTORY {
        return Err(AnalysisError::InsufficientData {
            required: MIN_HISTORY,
            actual: history.len(),
        });
    }

    let values: Vec<f64> = history.iter().map(|s| s.value).collect();
    let statistics = summary::summarize(history)?;
    let trend = timeseries::analyze_trends(history)?;

    let members = [
        linear_regression_forecast(&values, periods),
        seasonal_adjusted_forecast(&values, periods),
        exponential_smoothing_forecast(&values, periods, SMOOTHING_ALPHA),
    ];

    let forecast = (0..periods)
        .map(|i| members.iter().map(|m| m[i]).sum::<f64>() / members.len() as f64)
        .collect();

    let confidence_interval = (
        statistics.mean - INTERVAL_Z * statistics.std_dev,
        statistics.mean + INTERVAL_Z * statistics.std_dev,
    );

    Ok(TrendForecastModel {
        player: player.to_string(),
        trend,
        statistics,
        forecast,
        confidence_interval,
    })
}

/// Continue the least-squares regression line.
pub fn linear_regression_forecast(values: &[f64], periods: usize) -> Vec<f64> {
    let n = values.len() as f64;
    // Regression over x = 1..n
    let sum_x = n * (n + 1.0) / 2.0;
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values
        .iter()
        .enumerate()
        .map(|(i, y)| y * (i as f64 + 1.0))
        .sum();
    let sum_x_sq = n * (n + 1.0) * (2.0 * n + 1.0) / 6.0;

    let denominator = n * sum_x_sq - sum_x * sum_x;
    let slope = if denominator.abs() < f64::EPSILON {
        0.0
    } else {
        (n * sum_xy - sum_x * sum_y) / denominator
    };
    let intercept = (sum_y - slope * sum_x) / n;

    (1..=periods)
        .map(|i| slope * (n + i as f64) + intercept)
        .collect()
}

/// Extrapolate the last value by the average step-to-step ratio.
///
/// Steps whose previous value is ~0 are skipped; with no usable steps
/// the factor is 1.0 (flat continuation).
pub fn seasonal_adjusted_forecast(values: &[f64], periods: usize) -> Vec<f64> {
    let ratios: Vec<f64> = values
        .windows(2)
        .filter(|pair| pair[0].abs() > RATIO_EPSILON)
        .map(|pair| pair[1] / pair[0])
        .collect();
    let factor = if ratios.is_empty() {
        1.0
    } else {
        ratios.iter().sum::<f64>() / ratios.len() as f64
    };

    let last = *values.last().unwrap_or(&0.0);
    (1..=periods)
        .map(|i| last * factor.powi(i as i32))
        .collect()
}

/// Flat forecast at the exponentially smoothed level.
pub fn exponential_smoothing_forecast(values: &[f64], periods: usize, alpha: f64) -> Vec<f64> {
    let mut smoothed = values.first().copied().unwrap_or(0.0);
    for value in values.iter().skip(1) {
        // Equivalent to `alpha * value + (1.0 - alpha) * smoothed`, but
        // exact on constant series (no rounding drift).
        smoothed += alpha * (value - smoothed);
    }
    vec![smoothed; periods]
}
