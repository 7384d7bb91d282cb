#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod filter;
pub mod grid;
pub mod image;

// Numerical building blocks, public for tooling and tests.
pub mod config;
pub mod diff;
pub mod dual;
pub mod primal;
pub mod sweep;

// --- High-level re-exports -------------------------------------------------

pub use crate::driver::{denoise, Denoiser, StopCriteria};
pub use crate::dual::Variant;
pub use crate::error::{Result, TvError};
pub use crate::filter::{TvFilter, TvParams};
pub use crate::grid::{GridShape, Region, ScalarGrid, VectorGrid};

pub use crate::diagnostics::{DenoiseReport, SweepReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use tv_denoise::prelude::*;
///
/// let shape = GridShape::image(16, 16);
/// let noisy = ScalarGrid::filled(shape, 0.5);
/// let stop = StopCriteria::default();
/// let (u, report) = denoise(noisy, TvParams::default(), &stop, 4).unwrap();
/// assert!(report.converged);
/// assert_eq!(u.shape().dims(), &[16, 16]);
/// ```
pub mod prelude {
    pub use crate::{
        denoise, Denoiser, GridShape, Region, ScalarGrid, StopCriteria, TvFilter, TvParams,
        Variant, VectorGrid,
    };
}
