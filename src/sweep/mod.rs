//! Region-parallel sweep machinery.
//!
//! - [`step`]: the per-region dual and primal passes.
//! - [`reduce`]: combining per-region change records into `delta`.
//! - [`parallel`]: sequential / Rayon dispatch of regions.
//! - [`executor`]: validation and the two-pass sweep with its barriers.

pub mod executor;
pub mod parallel;
pub mod reduce;
pub mod step;

pub use executor::{execute_sweep, validate_regions, SweepOutcome};
pub use parallel::ParallelSweepOptions;
pub use reduce::{reduce_max, RegionChangeRecord};
pub use step::{StepCoefficients, StepState};
