//! Prop line prediction: context-adjusted point estimate plus hit
//! probability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::timeseries;
use crate::error::{AnalysisError, Result};
use crate::probability::{self, ConditionFactors};
use crate::stats;
use crate::types::{GameContext, ProbabilityEstimate, PropOutcome, Sample, TrendSummary};

/// Minimum prop history for a prediction.
pub const MIN_HISTORY: usize = 2;

/// Window for the moving-average ensemble member.
const ENSEMBLE_WINDOW: usize = 5;

/// Smoothing factor for the exponential-smoothing ensemble member.
const ENSEMBLE_ALPHA: f64 = 0.3;

/// One historical prop result: the realized stat value and whether the
/// line hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropRecord {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub hit: bool,
}

/// Batch input: one player's prop history plus optional context.
#[derive(Debug, Clone)]
pub struct PropInput {
    pub player: String,
    pub records: Vec<PropRecord>,
    pub context: Option<GameContext>,
}

/// Prop prediction for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropPrediction {
    pub player: String,
    /// Context-adjusted expected stat value.
    pub predicted_value: f64,
    pub probability: ProbabilityEstimate,
    pub trend: TrendSummary,
    pub confidence_score: f64,
}

/// Predict a player's prop from their history and the upcoming game's
/// context.
///
/// The point estimate is the historical mean scaled by the context
/// multiplier (unclamped: it is a stat value, not a probability). The
/// hit probability goes through the clamped condition adjustment.
pub fn predict(
    player: &str,
    records: &[PropRecord],
    ctx: Option<&GameContext>,
    factors: &ConditionFactors,
) -> Result<PropPrediction> {
    if records.len() < MIN_HISTORY {
        return Err(AnalysisError::InsufficientData {
            required: MIN_HISTORY,
            actual: records.len(),
        });
    }

    let values: Vec<f64> = records.iter().map(|r| r.value).collect();
    let samples: Vec<Sample> = records
        .iter()
        .map(|r| Sample::new(r.timestamp, r.value))
        .collect();
    let outcomes: Vec<PropOutcome> = records
        .iter()
        .map(|r| PropOutcome {
            hit: r.hit,
            timestamp: r.timestamp,
        })
        .collect();

    let base_value = stats::mean(&values)?;
    let multiplier = ctx.map(|c| factors.multiplier(c)).unwrap_or(1.0);

    let trend = timeseries::analyze_trends(&samples)?;
    let probability = probability::estimate(&outcomes, ctx, factors);

    Ok(PropPrediction {
        player: player.to_string(),
        predicted_value: base_value * multiplier,
        probability,
        trend,
        confidence_score: probability.confidence_score,
    })
}

/// Average of three point predictors: regression next-point, trailing
/// moving average, exponential smoothing.
pub fn ensemble_predict(records: &[PropRecord]) -> Result<f64> {
    if records.len() < MIN_HISTORY {
        return Err(AnalysisError::InsufficientData {
            required: MIN_HISTORY,
            actual: records.len(),
        });
    }
    let values: Vec<f64> = records.iter().map(|r| r.value).collect();

    let regression = super::trend::linear_regression_forecast(&values, 1)[0];
    let window_start = values.len().saturating_sub(ENSEMBLE_WINDOW);
    let moving_avg = stats::mean(&values[window_start..])?;
    let smoothed =
        super::trend::exponential_smoothing_forecast(&values, 1, ENSEMBLE_ALPHA)[0];

    Ok((regression + moving_avg + smoothed) / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn records(values: &[(f64, bool)]) -> Vec<PropRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, (v, hit))| PropRecord {
                timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 86_400, 0).unwrap(),
                value: *v,
                hit: *hit,
            })
            .collect()
    }

    #[test]
    fn test_predict_without_context_uses_plain_mean() {
        let history = records(&[(20.0, true), (24.0, true), (22.0, false), (26.0, true)]);
        let prediction =
            predict("booker", &history, None, &ConditionFactors::default()).unwrap();
        assert_eq!(prediction.predicted_value, 23.0);
        assert_eq!(prediction.probability.probability, 0.75);
    }

    #[test]
    fn test_predict_home_game_scales_value_and_probability() {
        let history = records(&[(20.0, true), (20.0, false), (20.0, true), (20.0, true)]);
        let ctx = GameContext {
            home_game: true,
            ..Default::default()
        };
        let prediction =
            predict("booker", &history, Some(&ctx), &ConditionFactors::default()).unwrap();
        assert!((prediction.predicted_value - 22.0).abs() < 1e-9); // 20 * 1.1
        assert!((prediction.probability.probability - 0.825).abs() < 1e-9); // 0.75 * 1.1
    }

    #[test]
    fn test_predict_insufficient_history() {
        let short = records(&[(20.0, true)]);
        assert_eq!(
            predict("booker", &short, None, &ConditionFactors::default()),
            Err(AnalysisError::InsufficientData {
                required: MIN_HISTORY,
                actual: 1
            })
        );
    }

    #[test]
    fn test_ensemble_constant_history() {
        let history = records(&[(15.0, true); 6]);
        let value = ensemble_predict(&history).unwrap();
        assert!((value - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_ensemble_between_history_extremes_for_noisy_series() {
        let history = records(&[
            (18.0, true),
            (25.0, false),
            (20.0, true),
            (23.0, true),
            (19.0, false),
            (22.0, true),
        ]);
        let value = ensemble_predict(&history).unwrap();
        assert!(
            (18.0..=25.0).contains(&value),
            "ensemble should stay within the observed range: {value}"
        );
    }
}
