//! Shared records exchanged with the application shell.
//!
//! Everything here is a plain serde value: no lifecycle, no interior
//! mutability. The shell feeds these in as JSON and renders what comes
//! back; the core never does I/O of its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical timestamped numeric sample.
///
/// Unifies the assorted per-caller shapes (performance points, prop
/// values, time-series points) into one record used by every analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Descriptive statistics over a performance history.
///
/// `std_dev` is the sample standard deviation (n - 1 denominator);
/// `volatility_pct` is the coefficient of variation in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticalSummary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub volatility_pct: f64,
}

/// Direction of a performance trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

/// Trend over a series: direction plus a 0-1 strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub direction: TrendDirection,
    /// How pronounced the trend is, 0.0 (flat) to 1.0 (steep).
    pub strength: f64,
    /// Raw least-squares slope per step.
    pub slope: f64,
}

/// Point forecast with a heuristic band.
///
/// The band is a fixed +/-10% of each point value, not a statistical
/// interval. `lower[i] <= values[i] <= upper[i]` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub values: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Forecast {
    /// Number of forecast periods.
    pub fn horizon(&self) -> usize {
        self.values.len()
    }
}

/// Correlation strength label per fixed breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl CorrelationStrength {
    /// Classify a coefficient: |r| > 0.8 very strong, > 0.6 strong,
    /// > 0.4 moderate, else weak.
    pub fn from_coefficient(r: f64) -> Self {
        let abs = r.abs();
        if abs > 0.8 {
            CorrelationStrength::VeryStrong
        } else if abs > 0.6 {
            CorrelationStrength::Strong
        } else if abs > 0.4 {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationStrength::Weak => "weak",
            CorrelationStrength::Moderate => "moderate",
            CorrelationStrength::Strong => "strong",
            CorrelationStrength::VeryStrong => "very strong",
        }
    }
}

/// One significant off-diagonal matrix cell, upper triangle only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub row: usize,
    pub col: usize,
    pub coefficient: f64,
    pub strength: CorrelationStrength,
}

/// Fractions of positive / neutral / negative posts, summing to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

/// A short social media post about a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Probability with a heuristic 0-100 confidence score.
///
/// The confidence score reflects how much evidence backed the estimate,
/// not a statistical confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityEstimate {
    pub probability: f64,
    pub confidence_score: f64,
}

/// Historical result of a single prop: did it hit?
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropOutcome {
    pub hit: bool,
    pub timestamp: DateTime<Utc>,
}

/// Weather bucket for outdoor games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Favorable,
    Normal,
    Extreme,
}

/// Situational conditions for an upcoming game.
///
/// Feeds the multiplicative condition adjustments in the probability
/// calculator. All flags default to off.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GameContext {
    #[serde(default)]
    pub home_game: bool,
    #[serde(default)]
    pub rival_team: bool,
    #[serde(default)]
    pub recent_injury: bool,
    #[serde(default)]
    pub weather: Option<Weather>,
}

impl GameContext {
    /// Number of conditions set on this context.
    pub fn active_conditions(&self) -> usize {
        let mut count = 0;
        if self.home_game {
            count += 1;
        }
        if self.rival_team {
            count += 1;
        }
        if self.recent_injury {
            count += 1;
        }
        if self.weather.is_some() {
            count += 1;
        }
        count
    }
}
