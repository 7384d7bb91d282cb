//! Stopping loop over [`TvFilter`] sweeps.
//!
//! The filter reports one `delta` per sweep and never decides when to stop.
//! [`Denoiser`] is the caller-side policy: sweep until `delta < tolerance` or
//! `max_sweeps` is reached, collecting a [`DenoiseReport`].
use crate::diagnostics::{DenoiseReport, InputDescriptor, TimingBreakdown};
use crate::error::{Result, TvError};
use crate::filter::{TvFilter, TvParams};
use crate::grid::{Region, ScalarGrid};
use crate::sweep::ParallelSweepOptions;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// When to stop sweeping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StopCriteria {
    /// Stop once a sweep reports `delta` strictly below this value.
    pub tolerance: f32,
    /// Hard cap on the number of sweeps.
    pub max_sweeps: usize,
    /// Evaluate the ROF energy after every sweep (one extra pass each).
    pub track_energy: bool,
}

impl Default for StopCriteria {
    fn default() -> Self {
        Self {
            tolerance: 1e-3,
            max_sweeps: 500,
            track_energy: false,
        }
    }
}

/// A filter plus a fixed region plan, driven until convergence.
pub struct Denoiser {
    filter: TvFilter,
    regions: Vec<Region>,
}

impl Denoiser {
    /// Bind `image` and split it into `region_count` slabs.
    pub fn new(image: ScalarGrid, params: TvParams, region_count: usize) -> Result<Self> {
        let mut filter = TvFilter::with_params(params)?;
        filter.set_original_image(image);
        let regions = filter.split_regions(region_count)?;
        Ok(Self { filter, regions })
    }

    /// Use a caller-supplied region plan instead of the slab split.
    pub fn with_regions(mut self, regions: Vec<Region>) -> Self {
        self.regions = regions;
        self
    }

    pub fn with_parallel(mut self, parallel: ParallelSweepOptions) -> Self {
        self.filter = self.filter.with_parallel(parallel);
        self
    }

    pub fn filter(&self) -> &TvFilter {
        &self.filter
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn into_filter(self) -> TvFilter {
        self.filter
    }

    /// Sweep until `stop` is satisfied. Can be called again to continue from
    /// the current state.
    pub fn run(&mut self, stop: &StopCriteria) -> Result<DenoiseReport> {
        let start = Instant::now();
        let mut history = Vec::new();
        let mut timings = TimingBreakdown::default();
        let mut converged = false;
        let mut final_delta = self.filter.previous_delta().unwrap_or(f32::INFINITY);

        for _ in 0..stop.max_sweeps {
            let report = self
                .filter
                .run_sweep_with_report(&self.regions, stop.track_energy)?;
            timings.accumulate(self.filter.last_timing());
            final_delta = report.delta;
            debug!(
                "Denoiser::run sweep={} delta={:.6e} energy={:?}",
                report.sweep, report.delta, report.energy
            );
            history.push(report);
            if final_delta < stop.tolerance {
                converged = true;
                break;
            }
        }
        if !converged {
            warn!(
                "Denoiser::run stopped after {} sweeps without reaching tolerance {:.3e} (delta={:.3e})",
                history.len(),
                stop.tolerance,
                final_delta
            );
        }
        timings.total_ms = start.elapsed().as_secs_f64() * 1000.0;

        let params = self.filter.params();
        let dims = self
            .filter
            .original_image()
            .map(|f| f.shape().dims().to_vec())
            .unwrap_or_default();
        Ok(DenoiseReport {
            input: InputDescriptor {
                dims,
                lambda: params.lambda,
                primal_step_size: params.primal_step_size,
                variant: params.variant,
                regions: self.regions.len(),
            },
            sweeps: history.len(),
            converged,
            final_delta,
            timings,
            history,
        })
    }

    /// Run to completion and hand back the solution with the report.
    pub fn finish(mut self, stop: &StopCriteria) -> Result<(ScalarGrid, DenoiseReport)> {
        let report = self.run(stop)?;
        let original = self.filter.original_image().cloned();
        let solution = self
            .filter
            .into_solution()
            .or(original)
            .ok_or(TvError::MissingOriginalImage)?;
        Ok((solution, report))
    }
}

/// One-shot denoising with a slab partition of `region_count` regions.
pub fn denoise(
    image: ScalarGrid,
    params: TvParams,
    stop: &StopCriteria,
    region_count: usize,
) -> Result<(ScalarGrid, DenoiseReport)> {
    Denoiser::new(image, params, region_count)?.finish(stop)
}
