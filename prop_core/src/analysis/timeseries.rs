//! Naive time-series decomposition, trend extraction and forecasting.
//!
//! These models favor determinism and transparency over statistical
//! rigor: the forecast extrapolates the last smoothed delta linearly,
//! and the band around it is a fixed percentage, not a derived
//! interval. Callers that need a real interval should use
//! `stats::confidence_interval` on their own residuals.

use std::f64::consts::PI;

use crate::error::{AnalysisError, Result};
use crate::stats;
use crate::types::{Forecast, Sample, TrendDirection, TrendSummary};

/// Minimum series length before any forecast is attempted.
pub const MIN_SERIES_LEN: usize = 5;

/// Window for the trend-smoothing moving average.
const TREND_WINDOW: usize = 3;

/// Half-width of the heuristic forecast band, as a fraction of the
/// point value.
const BAND_FRACTION: f64 = 0.10;

/// Normalized slope below which a trend is considered stable.
const STABLE_SLOPE: f64 = 0.02;

/// Forecast `horizon` future values from a performance series.
///
/// The trend component is a 3-point moving average; the last observed
/// trend delta is extrapolated linearly. The returned band is
/// +/-10% of each point value (lower never exceeds upper, including
/// for negative forecasts).
pub fn forecast(series: &[Sample], horizon: usize) -> Result<Forecast> {
    if horizon == 0 {
        return Err(AnalysisError::UnsupportedParameter(
            "forecast horizon must be at least 1".to_string(),
        ));
    }
    if series.len() < MIN_SERIES_LEN {
        return Err(AnalysisError::InsufficientData {
            required: MIN_SERIES_LEN,
            actual: series.len(),
        });
    }

    let values: Vec<f64> = series.iter().map(|s| s.value).collect();
    let trend = stats::moving_average(&values, TREND_WINDOW)?;

    let last_value = values[values.len() - 1];
    let trend_delta = trend[trend.len() - 1] - trend[trend.len() - 2];

    let forecast_values: Vec<f64> = (1..=horizon)
        .map(|step| last_value + trend_delta * step as f64)
        .collect();

    let lower = forecast_values
        .iter()
        .map(|v| v - BAND_FRACTION * v.abs())
        .collect();
    let upper = forecast_values
        .iter()
        .map(|v| v + BAND_FRACTION * v.abs())
        .collect();

    Ok(Forecast {
        values: forecast_values,
        lower,
        upper,
    })
}

/// Deterministic periodic weighting of a series: value * sin(i*pi/6).
///
/// This is a fixed 12-step periodic weighting, not a seasonal
/// decomposition; it does not recover any true seasonality.
pub fn decompose_seasonality(series: &[Sample]) -> Vec<f64> {
    series
        .iter()
        .enumerate()
        .map(|(i, s)| s.value * (i as f64 * PI / 6.0).sin())
        .collect()
}

/// Smoothed trend component (3-point trailing moving average).
pub fn extract_trend(series: &[Sample]) -> Result<Vec<f64>> {
    let values: Vec<f64> = series.iter().map(|s| s.value).collect();
    stats::moving_average(&values, TREND_WINDOW)
}

/// Classify the overall trend of a series from its least-squares
/// slope, normalized by the series mean.
pub fn analyze_trends(series: &[Sample]) -> Result<TrendSummary> {
    if series.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            required: 2,
            actual: series.len(),
        });
    }

    let values: Vec<f64> = series.iter().map(|s| s.value).collect();
    let slope = least_squares_slope(&values);
    let mean = stats::mean(&values)?;

    // Slope per step relative to the typical level, so a 20-point
    // scorer trending up by 1 point per game reads the same as a
    // 10-point scorer trending up by 0.5.
    let normalized = if mean.abs() < f64::EPSILON {
        slope
    } else {
        slope / mean.abs()
    };

    let direction = if normalized > STABLE_SLOPE {
        TrendDirection::Improving
    } else if normalized < -STABLE_SLOPE {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };

    Ok(TrendSummary {
        direction,
        strength: (normalized.abs() * 5.0).min(1.0),
        slope,
    })
}

/// Ordinary least-squares slope over indices 0..n.
fn least_squares_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum_x = (n - 1.0) * n / 2.0;
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
    let sum_x_sq: f64 = (0..values.len()).map(|i| (i * i) as f64).sum();

    let denominator = n * sum_x_sq - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_series(values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Sample::new(Utc.timestamp_opt(1_700_000_000 + i as i64 * 86_400, 0).unwrap(), *v))
            .collect()
    }

    #[test]
    fn test_forecast_requires_five_points() {
        let short = make_series(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            forecast(&short, 5),
            Err(AnalysisError::InsufficientData {
                required: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn test_forecast_horizon_length() {
        let series = make_series(&[10.0, 12.0, 11.0, 13.0, 14.0, 15.0]);
        let fc = forecast(&series, 5).unwrap();
        assert_eq!(fc.horizon(), 5);
        assert_eq!(fc.lower.len(), 5);
        assert_eq!(fc.upper.len(), 5);
    }

    #[test]
    fn test_forecast_band_ordering() {
        // A declining series produces negative deltas; the band must
        // still satisfy lower <= value <= upper everywhere.
        let series = make_series(&[10.0, 5.0, 0.0, -5.0, -10.0, -15.0]);
        let fc = forecast(&series, 4).unwrap();
        for i in 0..fc.horizon() {
            assert!(
                fc.lower[i] <= fc.values[i] && fc.values[i] <= fc.upper[i],
                "band inverted at {}: {} / {} / {}",
                i,
                fc.lower[i],
                fc.values[i],
                fc.upper[i]
            );
        }
    }

    #[test]
    fn test_forecast_extends_linear_trend() {
        // Perfectly linear series: the smoothed delta equals the raw
        // delta, so the forecast continues the line exactly.
        let series = make_series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let fc = forecast(&series, 3).unwrap();
        assert!((fc.values[0] - 6.0).abs() < 1e-9);
        assert!((fc.values[1] - 7.0).abs() < 1e-9);
        assert!((fc.values[2] - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_seasonality_is_periodic_weighting() {
        let series = make_series(&[1.0; 13]);
        let seasonal = decompose_seasonality(&series);
        assert_eq!(seasonal[0], 0.0); // sin(0)
        assert!((seasonal[3] - 1.0).abs() < 1e-9); // sin(pi/2)
        assert!(seasonal[12].abs() < 1e-9); // sin(2*pi)
    }

    #[test]
    fn test_trend_directions() {
        let up = analyze_trends(&make_series(&[10.0, 12.0, 14.0, 16.0, 18.0])).unwrap();
        assert_eq!(up.direction, TrendDirection::Improving);
        assert!(up.strength > 0.0);

        let down = analyze_trends(&make_series(&[18.0, 16.0, 14.0, 12.0, 10.0])).unwrap();
        assert_eq!(down.direction, TrendDirection::Declining);

        let flat = analyze_trends(&make_series(&[14.0, 14.1, 13.9, 14.0, 14.0])).unwrap();
        assert_eq!(flat.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_trend_strength_capped() {
        let steep = analyze_trends(&make_series(&[1.0, 10.0, 20.0, 30.0, 40.0])).unwrap();
        assert!(steep.strength <= 1.0);
    }
}
