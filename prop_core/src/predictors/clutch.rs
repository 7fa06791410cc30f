//! Clutch performance analysis: how a player holds up in high-leverage
//! situations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::summary;
use crate::error::{AnalysisError, Result};
use crate::probability::{self, ConditionFactors};
use crate::types::{ProbabilityEstimate, PropOutcome, Sample, StatisticalSummary};

/// Weight of the mean clutch output in the final score.
const W_MEAN: f64 = 0.4;
/// Weight of the clutch hit probability (scaled to 0-100).
const W_PROBABILITY: f64 = 0.3;
/// Weight of the evidence confidence score.
const W_CONFIDENCE: f64 = 0.3;

/// One historical performance snapshot with its game situation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClutchScenario {
    pub timestamp: DateTime<Utc>,
    /// Player output in this snapshot (points, yards, ...).
    pub value: f64,
    /// Did the prop hit in this scenario?
    pub hit: bool,
    pub time_remaining_seconds: u32,
    /// Current score margin, positive or negative.
    pub score_differential: i32,
    pub playoff_game: bool,
    pub final_period: bool,
}

/// How the individual clutch conditions combine.
///
/// `Any` (the historical behavior) treats a snapshot as clutch when
/// any single condition holds, which makes nearly every close or
/// late-game snapshot qualify. `All` requires every condition. The
/// mode is configuration so the predicate can be narrowed without a
/// code change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriteriaMode {
    Any,
    All,
}

/// What counts as a clutch situation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClutchCriteria {
    /// Snapshot qualifies when this much or less game time remains.
    pub late_game_seconds: u32,
    /// Snapshot qualifies when the score margin is within this.
    pub close_score_margin: u32,
    pub mode: CriteriaMode,
}

impl Default for ClutchCriteria {
    fn default() -> Self {
        Self {
            late_game_seconds: 300,
            close_score_margin: 5,
            mode: CriteriaMode::Any,
        }
    }
}

impl ClutchCriteria {
    /// Does this snapshot qualify as a clutch situation?
    pub fn is_clutch(&self, scenario: &ClutchScenario) -> bool {
        let conditions = [
            scenario.time_remaining_seconds <= self.late_game_seconds,
            scenario.score_differential.unsigned_abs() <= self.close_score_margin,
            scenario.playoff_game,
            scenario.final_period,
        ];
        match self.mode {
            CriteriaMode::Any => conditions.iter().any(|c| *c),
            CriteriaMode::All => conditions.iter().all(|c| *c),
        }
    }
}

/// Batch input: one player's scenario history.
#[derive(Debug, Clone)]
pub struct ClutchInput {
    pub player: String,
    pub history: Vec<ClutchScenario>,
}

/// Output of a clutch analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClutchModel {
    pub player: String,
    /// Scenarios that matched the clutch criteria.
    pub scenario_count: usize,
    pub statistics: StatisticalSummary,
    pub probability: ProbabilityEstimate,
    /// Weighted composite: 0.4 * mean + 0.3 * prob*100 + 0.3 * confidence.
    pub clutch_score: f64,
}

/// Analyze a player's clutch history.
///
/// Filters the history down to scenarios matching `criteria`, then
/// summarizes the filtered outputs and estimates the clutch hit
/// probability. Fails with `InsufficientData` when fewer than two
/// scenarios qualify.
pub fn analyze(
    player: &str,
    history: &[ClutchScenario],
    criteria: &ClutchCriteria,
) -> Result<ClutchModel> {
    let clutch: Vec<&ClutchScenario> =
        history.iter().filter(|s| criteria.is_clutch(s)).collect();
    debug!(
        player,
        total = history.len(),
        clutch = clutch.len(),
        "filtered clutch scenarios"
    );

    if clutch.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            required: 2,
            actual: clutch.len(),
        });
    }

    let samples: Vec<Sample> = clutch
        .iter()
        .map(|s| Sample::new(s.timestamp, s.value))
        .collect();
    let statistics = summary::summarize(&samples)?;

    let outcomes: Vec<PropOutcome> = clutch
        .iter()
        .map(|s| PropOutcome {
            hit: s.hit,
            timestamp: s.timestamp,
        })
        .collect();
    let probability = probability::estimate(&outcomes, None, &ConditionFactors::default());

    let clutch_score = W_MEAN * statistics.mean
        + W_PROBABILITY * probability.probability * 100.0
        + W_CONFIDENCE * probability.confidence_score;

    Ok(ClutchModel {
        player: player.to_string(),
        scenario_count: clutch.len(),
        statistics,
        probability,
        clutch_score,
    })
}
