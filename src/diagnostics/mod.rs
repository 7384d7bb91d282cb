//! Serializable diagnostics produced by the solver and its tools.
//!
//! `SweepReport` describes a single sweep, `DenoiseReport` a full stopping
//! loop; both carry `TimingBreakdown`s so the demo binary can dump them as JSON.

pub mod report;
pub mod timing;

pub use report::{DenoiseReport, InputDescriptor, SweepReport};
pub use timing::{StageTiming, TimingBreakdown};
