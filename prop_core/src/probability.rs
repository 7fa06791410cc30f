//! Prop probability from historical hit rates plus situational
//! adjustments.
//!
//! The condition factors are configuration, not code: callers build a
//! `ConditionFactors` (or take the defaults, which match the original
//! hand-tuned table) and pass it in, so the weighting can be corrected
//! without a release.

use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::types::{GameContext, ProbabilityEstimate, PropOutcome, Weather};

/// Neutral prior reported when there is no history at all.
const NEUTRAL_PRIOR: f64 = 0.5;

/// Confidence contributed per historical sample.
const CONFIDENCE_PER_SAMPLE: f64 = 10.0;

/// Confidence contributed per active condition.
const CONFIDENCE_PER_CONDITION: f64 = 5.0;

/// Multiplicative adjustment factors per situational condition.
///
/// Order-independent by construction (pure multiplication).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionFactors {
    pub home_game: f64,
    pub rival_team: f64,
    pub recent_injury: f64,
    pub weather_extreme: f64,
    pub weather_favorable: f64,
}

impl Default for ConditionFactors {
    fn default() -> Self {
        Self {
            home_game: 1.1,
            rival_team: 0.9,
            recent_injury: 0.8,
            weather_extreme: 0.7,
            weather_favorable: 1.2,
        }
    }
}

impl ConditionFactors {
    /// Combined multiplier for a context.
    pub fn multiplier(&self, ctx: &GameContext) -> f64 {
        let mut factor = 1.0;
        if ctx.home_game {
            factor *= self.home_game;
        }
        if ctx.rival_team {
            factor *= self.rival_team;
        }
        if ctx.recent_injury {
            factor *= self.recent_injury;
        }
        match ctx.weather {
            Some(Weather::Extreme) => factor *= self.weather_extreme,
            Some(Weather::Favorable) => factor *= self.weather_favorable,
            Some(Weather::Normal) | None => {}
        }
        factor
    }
}

/// Hit rate over historical prop outcomes.
///
/// No history yields the 0.5 neutral prior, the documented stand-in
/// for "we know nothing" (a probability, unlike mean-of-empty which is
/// an error in this crate).
pub fn historical_probability(outcomes: &[PropOutcome]) -> f64 {
    if outcomes.is_empty() {
        debug!("no historical outcomes, using neutral prior {NEUTRAL_PRIOR}");
        return NEUTRAL_PRIOR;
    }
    let hits = outcomes.iter().filter(|o| o.hit).count();
    hits as f64 / outcomes.len() as f64
}

/// Apply situational condition factors to a base probability.
///
/// The result is clamped to [0, 1]; no combination of conditions can
/// push it outside.
pub fn apply_conditions(base: f64, ctx: &GameContext, factors: &ConditionFactors) -> f64 {
    (base * factors.multiplier(ctx)).clamp(0.0, 1.0)
}

/// Heuristic 0-100 confidence score.
///
/// min(samples * 10 + conditions * 5, 100). More history and more
/// known conditions mean more confidence; this is an evidence tally,
/// not a statistical confidence level.
pub fn confidence_score(sample_count: usize, condition_count: usize) -> f64 {
    (sample_count as f64 * CONFIDENCE_PER_SAMPLE
        + condition_count as f64 * CONFIDENCE_PER_CONDITION)
        .min(100.0)
}

/// Full estimate: historical hit rate, condition-adjusted, with a
/// confidence score.
pub fn estimate(
    outcomes: &[PropOutcome],
    ctx: Option<&GameContext>,
    factors: &ConditionFactors,
) -> ProbabilityEstimate {
    let base = historical_probability(outcomes);
    let (probability, conditions) = match ctx {
        Some(ctx) => (apply_conditions(base, ctx, factors), ctx.active_conditions()),
        None => (base, 0),
    };
    ProbabilityEstimate {
        probability,
        confidence_score: confidence_score(outcomes.len(), conditions),
    }
}

/// Compound probability of independent events (product).
pub fn compound_probability(probabilities: &[f64]) -> Result<f64> {
    if probabilities.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    if let Some(bad) = probabilities.iter().find(|p| !(0.0..=1.0).contains(*p)) {
        return Err(AnalysisError::UnsupportedParameter(format!(
            "probability must be in [0, 1], got {bad}"
        )));
    }
    Ok(probabilities.iter().product())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn outcomes(hits: &[bool]) -> Vec<PropOutcome> {
        hits.iter()
            .map(|h| PropOutcome {
                hit: *h,
                timestamp: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn test_historical_hit_rate() {
        let history = outcomes(&[true, true, false, true]);
        assert_eq!(historical_probability(&history), 0.75);
    }

    #[test]
    fn test_empty_history_neutral_prior() {
        assert_eq!(historical_probability(&[]), 0.5);
    }

    #[test]
    fn test_home_game_adjustment() {
        let ctx = GameContext {
            home_game: true,
            ..Default::default()
        };
        let adjusted = apply_conditions(0.5, &ctx, &ConditionFactors::default());
        assert!((adjusted - 0.55).abs() < 1e-12, "0.5 * 1.1 = 0.55, got {adjusted}");
    }

    #[test]
    fn test_conditions_clamped() {
        let boost = GameContext {
            home_game: true,
            weather: Some(Weather::Favorable),
            ..Default::default()
        };
        let factors = ConditionFactors::default();
        assert!(apply_conditions(0.95, &boost, &factors) <= 1.0);

        let drag = GameContext {
            rival_team: true,
            recent_injury: true,
            weather: Some(Weather::Extreme),
            ..Default::default()
        };
        let adjusted = apply_conditions(0.05, &drag, &factors);
        assert!((0.0..=1.0).contains(&adjusted));
    }

    #[test]
    fn test_normal_weather_is_neutral() {
        let ctx = GameContext {
            weather: Some(Weather::Normal),
            ..Default::default()
        };
        assert_eq!(apply_conditions(0.6, &ctx, &ConditionFactors::default()), 0.6);
    }

    #[test]
    fn test_confidence_score_capped() {
        assert_eq!(confidence_score(3, 2), 40.0);
        assert_eq!(confidence_score(50, 4), 100.0);
    }

    #[test]
    fn test_estimate_composes() {
        let history = outcomes(&[true, false, true, true]);
        let ctx = GameContext {
            home_game: true,
            ..Default::default()
        };
        let est = estimate(&history, Some(&ctx), &ConditionFactors::default());
        assert!((est.probability - 0.825).abs() < 1e-9); // 0.75 * 1.1
        assert_eq!(est.confidence_score, 45.0); // 4 * 10 + 1 * 5
    }

    #[test]
    fn test_compound_probability() {
        let p = compound_probability(&[0.5, 0.5, 0.8]).unwrap();
        assert!((p - 0.2).abs() < 1e-12);
        assert!(matches!(
            compound_probability(&[0.5, 1.2]),
            Err(AnalysisError::UnsupportedParameter(_))
        ));
        assert_eq!(compound_probability(&[]), Err(AnalysisError::EmptyInput));
    }
}
