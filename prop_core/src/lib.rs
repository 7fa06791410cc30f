//! Propcast Core - statistical analysis and forecasting for prop bet
//! analytics.
//!
//! This library provides:
//! - Statistical primitives (mean, deviation, correlation, Bayesian
//!   updates, confidence intervals)
//! - Time-series trend extraction and naive forecasting
//! - Pairwise correlation matrices across player metric histories
//! - Lexicon-based sentiment scoring over social posts
//! - Historical-hit-rate prop probability with situational adjustments
//! - Composite clutch / fatigue / trend / prop predictors
//! - Batch processing via rayon
//!
//! Everything is pure and synchronous: arrays in, records out. The
//! application shell owns all I/O, caching and user messaging; this
//! crate only computes and emits `tracing` events at debug level.

pub mod analysis;
pub mod error;
pub mod predictors;
pub mod probability;
pub mod stats;
mod types;

use rayon::prelude::*;

pub use error::{AnalysisError, Result};
pub use types::*;

use predictors::clutch::{self, ClutchCriteria, ClutchInput, ClutchModel};
use predictors::prop::{self, PropInput, PropPrediction};
use probability::ConditionFactors;

/// Predict props for many players in parallel.
///
/// Results are returned in input order; a bad history fails that entry
/// only, not the batch.
pub fn batch_predict_props(
    items: &[PropInput],
    factors: &ConditionFactors,
) -> Vec<Result<PropPrediction>> {
    items
        .par_iter()
        .map(|item| prop::predict(&item.player, &item.records, item.context.as_ref(), factors))
        .collect()
}

/// Compute clutch models for many players in parallel.
pub fn batch_clutch_scores(
    items: &[ClutchInput],
    criteria: &ClutchCriteria,
) -> Vec<Result<ClutchModel>> {
    items
        .par_iter()
        .map(|item| clutch::analyze(&item.player, &item.history, criteria))
        .collect()
}
