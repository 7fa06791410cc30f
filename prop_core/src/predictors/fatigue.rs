//! Fatigue risk from game density, rest deficit and performance
//! variance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::summary;
use crate::error::Result;
use crate::types::{Sample, StatisticalSummary};

/// Rest days assumed when the schedule is too short to measure.
const DEFAULT_REST_DAYS: f64 = 7.0;

/// Density score lost per average rest day.
const DENSITY_PER_REST_DAY: f64 = 10.0;

/// Weight of game density in the fatigue risk.
const W_DENSITY: f64 = 0.5;
/// Weight of the decline probability (scaled to 0-100).
const W_DECLINE: f64 = 0.5;
/// Multiplier on performance standard deviation in the risk score.
const W_VARIANCE: f64 = 10.0;

/// Degradation is capped at this fraction of the mean output.
const MAX_DEGRADATION_FRACTION: f64 = 0.3;

/// Risk above which a rest recommendation is emitted.
const REST_RISK_THRESHOLD: f64 = 70.0;
/// Degradation fraction above which reduced minutes are recommended.
const MINUTES_DEGRADATION_FRACTION: f64 = 0.2;
/// Minimum rest days before recovery work is recommended.
const MIN_REST_DAYS: f64 = 2.0;

/// Fatigue prediction for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueModel {
    pub player: String,
    /// 0 (fully rested) to 100 (back-to-backs with no rest).
    pub game_density_score: f64,
    /// Longest consecutive rest stretch in the schedule, in days.
    pub max_rest_days: f64,
    pub statistics: StatisticalSummary,
    /// Composite risk, 0-100.
    pub fatigue_risk: f64,
    /// Expected output drop in the metric's own units.
    pub performance_degradation: f64,
    pub recommendations: Vec<String>,
}

/// Game density score from a schedule: 100 - avg rest days * 10,
/// clamped to [0, 100].
///
/// Fewer days between games means a higher score. A schedule with
/// fewer than two games measures nothing and falls back to the
/// league-typical week of rest.
pub fn game_density_score(schedule: &[DateTime<Utc>]) -> f64 {
    let average_rest = average_days_between(schedule).unwrap_or(DEFAULT_REST_DAYS);
    (100.0 - average_rest * DENSITY_PER_REST_DAY).clamp(0.0, 100.0)
}

/// Longest stretch of consecutive rest days in the schedule.
pub fn max_rest_days(schedule: &[DateTime<Utc>]) -> f64 {
    let mut sorted = schedule.to_vec();
    sorted.sort();

    let mut max_rest: f64 = 0.0;
    for pair in sorted.windows(2) {
        let days_between = (pair[1] - pair[0]).num_seconds() as f64 / 86_400.0;
        if days_between > 1.0 {
            max_rest = max_rest.max(days_between - 1.0);
        }
    }
    max_rest
}

fn average_days_between(schedule: &[DateTime<Utc>]) -> Option<f64> {
    if schedule.len() < 2 {
        return None;
    }
    let mut sorted = schedule.to_vec();
    sorted.sort();
    let gaps: Vec<f64> = sorted
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_seconds() as f64 / 86_400.0)
        .collect();
    Some(gaps.iter().sum::<f64>() / gaps.len() as f64)
}

/// Predict fatigue for a player from their schedule and performance
/// history.
///
/// The decline probability is the fraction of performances below the
/// player's own mean; dense schedules amplify the variance term. Risk
/// is capped at 100 and degradation at 30% of mean output.
pub fn predict(
    player: &str,
    schedule: &[DateTime<Utc>],
    history: &[Sample],
) -> Result<FatigueModel> {
    let density = game_density_score(schedule);
    let rest = max_rest_days(schedule);
    let statistics = summary::summarize(history)?;

    let below_mean = history
        .iter()
        .filter(|s| s.value < statistics.mean)
        .count();
    let decline_probability = below_mean as f64 / history.len() as f64;

    let fatigue_risk = (W_DENSITY * density
        + W_VARIANCE * statistics.std_dev
        + W_DECLINE * decline_probability * 100.0)
        .min(100.0);

    let degradation_factor = density / 100.0;
    let performance_degradation = (statistics.std_dev * degradation_factor * 2.0)
        .min(statistics.mean.abs() * MAX_DEGRADATION_FRACTION);

    debug!(
        player,
        density, fatigue_risk, performance_degradation, "fatigue prediction"
    );

    let model = FatigueModel {
        player: player.to_string(),
        game_density_score: density,
        max_rest_days: rest,
        statistics,
        fatigue_risk,
        performance_degradation,
        recommendations: Vec::new(),
    };
    Ok(FatigueModel {
        recommendations: recommend(&model),
        ..model
    })
}

/// Load-management recommendations from a fatigue model.
pub fn recommend(model: &FatigueModel) -> Vec<String> {
    let mut recommendations = Vec::new();

    if model.fatigue_risk > REST_RISK_THRESHOLD {
        recommendations.push("Consider player rest".to_string());
    }
    if model.performance_degradation
        > MINUTES_DEGRADATION_FRACTION * model.statistics.mean.abs()
    {
        recommendations.push("Reduce playing time".to_string());
    }
    if model.max_rest_days < MIN_REST_DAYS {
        recommendations.push("Implement active recovery protocol".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push("No specific load management required".to_string());
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + n * 86_400, 0).unwrap()
    }

    fn history(values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Sample::new(day(i as i64), *v))
            .collect()
    }

    #[test]
    fn test_density_back_to_backs_is_high() {
        // Games every single day: zero rest, maximum density
        let schedule: Vec<_> = (0..6).map(day).collect();
        assert_eq!(game_density_score(&schedule), 90.0);
    }

    #[test]
    fn test_density_weekly_games_is_low() {
        let schedule: Vec<_> = (0..4).map(|i| day(i * 7)).collect();
        assert_eq!(game_density_score(&schedule), 30.0);
    }

    #[test]
    fn test_density_empty_schedule_uses_default_rest() {
        // 100 - 7 * 10 = 30
        assert_eq!(game_density_score(&[]), 30.0);
    }

    #[test]
    fn test_max_rest_days() {
        let schedule = vec![day(0), day(1), day(5), day(6)];
        // Gap of 4 days between day 1 and day 5 -> 3 full rest days
        assert_eq!(max_rest_days(&schedule), 3.0);
    }

    #[test]
    fn test_predict_dense_schedule_raises_risk() {
        let values = [22.0, 20.0, 18.0, 21.0, 17.0, 19.0];
        let dense: Vec<_> = (0..6).map(day).collect();
        let sparse: Vec<_> = (0..6).map(|i| day(i * 4)).collect();

        let dense_model = predict("embiid", &dense, &history(&values)).unwrap();
        let sparse_model = predict("embiid", &sparse, &history(&values)).unwrap();

        assert!(
            dense_model.fatigue_risk > sparse_model.fatigue_risk,
            "denser schedule must carry more risk: {} vs {}",
            dense_model.fatigue_risk,
            sparse_model.fatigue_risk
        );
        assert!(dense_model.fatigue_risk <= 100.0);
    }

    #[test]
    fn test_degradation_capped_at_thirty_percent() {
        // Wildly volatile history against a dense schedule
        let values = [5.0, 40.0, 2.0, 38.0, 4.0, 41.0];
        let schedule: Vec<_> = (0..6).map(day).collect();
        let model = predict("embiid", &schedule, &history(&values)).unwrap();
        assert!(model.performance_degradation <= model.statistics.mean * 0.3 + 1e-9);
    }

    #[test]
    fn test_recommendations_for_high_risk() {
        let values = [5.0, 40.0, 2.0, 38.0, 4.0, 41.0];
        let schedule: Vec<_> = (0..6).map(day).collect();
        let model = predict("embiid", &schedule, &history(&values)).unwrap();
        assert!(model
            .recommendations
            .contains(&"Consider player rest".to_string()));
        assert!(model
            .recommendations
            .contains(&"Implement active recovery protocol".to_string()));
    }

    #[test]
    fn test_no_recommendations_needed() {
        let values = [20.0, 21.0, 20.5, 19.5, 20.0, 20.5];
        let schedule: Vec<_> = (0..6).map(|i| day(i * 5)).collect();
        let model = predict("embiid", &schedule, &history(&values)).unwrap();
        assert_eq!(
            model.recommendations,
            vec!["No specific load management required".to_string()]
        );
    }
}
