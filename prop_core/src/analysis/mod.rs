//! Analyzers built on the statistical primitives.

pub mod correlation;
pub mod sentiment;
pub mod summary;
pub mod timeseries;
