//! Domain composites: clutch, fatigue, trend and prop predictors.
//!
//! Each composite filters a relevant sub-history, runs the analysis
//! modules over it, and combines the outputs with fixed documented
//! weights. Single pass, synchronous, no state.

pub mod clutch;
pub mod fatigue;
pub mod prop;
pub mod trend;
