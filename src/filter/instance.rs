//! The stateful TV filter: owns `u` and `X`, runs one sweep per call.
//!
//! Typical usage:
//! ```no_run
//! use tv_denoise::{ScalarGrid, TvFilter, TvParams};
//!
//! # fn example(noisy: ScalarGrid) -> tv_denoise::Result<()> {
//! let mut filter = TvFilter::with_params(TvParams::default())?;
//! filter.set_original_image(noisy);
//! let regions = filter.split_regions(8)?;
//! for _ in 0..100 {
//!     if filter.run_sweep(&regions)? < 1e-3 {
//!         break;
//!     }
//! }
//! let denoised = filter.solution();
//! # Ok(())
//! # }
//! ```
use super::params::TvParams;
use crate::diagnostics::{SweepReport, TimingBreakdown};
use crate::diff;
use crate::error::{Result, TvError};
use crate::grid::{Region, ScalarGrid, VectorGrid};
use crate::primal::reconstruct_into;
use crate::sweep::{
    execute_sweep, validate_regions, ParallelSweepOptions, RegionChangeRecord, StepCoefficients,
    StepState,
};
use log::{debug, warn};
use std::time::Instant;

/// Total-variation filter holding the observation, the primal solution and
/// the dual field across sweeps.
#[derive(Clone, Debug)]
pub struct TvFilter {
    params: TvParams,
    parallel: ParallelSweepOptions,
    original: Option<ScalarGrid>,
    solution: Option<ScalarGrid>,
    dual: Option<VectorGrid>,
    /// Cleared whenever `u` may be inconsistent with `f`, `X` or `λ`; the next
    /// sweep rebuilds `u = f − λ·div X` (zero-filling `X` first if absent).
    initialized: bool,
    previous_delta: Option<f32>,
    sweeps_run: usize,
    last_records: Vec<RegionChangeRecord>,
    last_timing: TimingBreakdown,
}

impl Default for TvFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TvFilter {
    /// Filter with default parameters and no bound image.
    pub fn new() -> Self {
        Self {
            params: TvParams::default(),
            parallel: ParallelSweepOptions::default(),
            original: None,
            solution: None,
            dual: None,
            initialized: false,
            previous_delta: None,
            sweeps_run: 0,
            last_records: Vec::new(),
            last_timing: TimingBreakdown::default(),
        }
    }

    /// Filter with validated parameters.
    pub fn with_params(params: TvParams) -> Result<Self> {
        let mut filter = Self::new();
        filter.configure(params)?;
        Ok(filter)
    }

    pub fn with_parallel(mut self, parallel: ParallelSweepOptions) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the solver parameters.
    ///
    /// Reconfiguring after sweeps keeps the dual field; the solution is rebuilt
    /// from it on the next sweep. Switching variants mid-run needs
    /// [`reset_dual`](Self::reset_dual), which is the caller's call to make.
    pub fn configure(&mut self, params: TvParams) -> Result<()> {
        params.validate()?;
        if self.sweeps_run > 0 {
            warn!(
                "TvFilter::configure after {} sweeps: {:?} -> {:?}",
                self.sweeps_run, self.params, params
            );
            if params.variant != self.params.variant && self.dual.is_some() {
                warn!("TvFilter::configure switched variant without resetting the dual field");
            }
        }
        self.params = params;
        self.initialized = false;
        Ok(())
    }

    /// Bind the observation `f`. Its shape fixes the grid for later sweeps.
    /// Any previous solution is dropped.
    pub fn set_original_image(&mut self, original: ScalarGrid) {
        debug!(
            "TvFilter::set_original_image dims={:?}",
            original.shape().dims()
        );
        self.original = Some(original);
        self.solution = None;
        self.initialized = false;
    }

    pub fn original_image(&self) -> Option<&ScalarGrid> {
        self.original.as_ref()
    }

    pub fn params(&self) -> &TvParams {
        &self.params
    }

    pub fn parallel(&self) -> ParallelSweepOptions {
        self.parallel
    }

    /// Current solution `u`; `None` before the first sweep.
    pub fn solution(&self) -> Option<&ScalarGrid> {
        self.solution.as_ref()
    }

    pub fn into_solution(self) -> Option<ScalarGrid> {
        self.solution
    }

    /// Current dual field `X`; `None` until a sweep ran or one was installed.
    pub fn dual_field(&self) -> Option<&VectorGrid> {
        self.dual.as_ref()
    }

    /// Mutable dual field. Edits are picked up by the next sweep, which
    /// rebuilds `u` from the edited field.
    pub fn dual_field_mut(&mut self) -> Option<&mut VectorGrid> {
        self.initialized = false;
        self.dual.as_mut()
    }

    /// Install a dual field, e.g. from a checkpoint. Its shape is checked on
    /// the next sweep.
    pub fn set_dual_field(&mut self, dual: VectorGrid) {
        self.dual = Some(dual);
        self.initialized = false;
    }

    /// Drop the dual field; the next sweep starts again from `X = 0`.
    pub fn reset_dual(&mut self) {
        self.dual = None;
        self.initialized = false;
        self.previous_delta = None;
    }

    /// `delta` reported by the last completed sweep.
    pub fn previous_delta(&self) -> Option<f32> {
        self.previous_delta
    }

    pub fn sweeps_run(&self) -> usize {
        self.sweeps_run
    }

    /// Per-region records of the last completed sweep.
    pub fn last_records(&self) -> &[RegionChangeRecord] {
        &self.last_records
    }

    pub fn last_timing(&self) -> &TimingBreakdown {
        &self.last_timing
    }

    /// Single region covering the bound image.
    pub fn full_region(&self) -> Result<Region> {
        let original = self.original.as_ref().ok_or(TvError::MissingOriginalImage)?;
        Ok(Region::full(original.shape()))
    }

    /// Slab partition of the bound image into at most `count` regions.
    pub fn split_regions(&self, count: usize) -> Result<Vec<Region>> {
        Ok(self.full_region()?.split(count))
    }

    /// ROF energy of the current solution.
    pub fn energy(&self) -> Option<f64> {
        let (u, f) = (self.solution.as_ref()?, self.original.as_ref()?);
        Some(diff::energy(u, f, self.params.lambda))
    }

    /// Run one iteration over `regions` and return the reduced `delta`.
    ///
    /// Regions must be disjoint and inside the grid; any violation aborts the
    /// sweep before a single cell is written.
    pub fn run_sweep(&mut self, regions: &[Region]) -> Result<f32> {
        let start = Instant::now();
        let original = self.original.as_ref().ok_or(TvError::MissingOriginalImage)?;
        let shape = original.shape();
        validate_regions(shape, regions)?;
        if let Some(dual) = &self.dual {
            shape.ensure_same(dual.shape(), "dual field")?;
        }

        let init_start = Instant::now();
        let dual = self
            .dual
            .get_or_insert_with(|| VectorGrid::zeros(shape.clone()));
        let solution = self
            .solution
            .get_or_insert_with(|| ScalarGrid::zeros(shape.clone()));
        if !self.initialized {
            reconstruct_into(solution, original, dual, self.params.lambda);
            self.initialized = true;
            debug!("TvFilter::run_sweep initialized primal from dual field");
        }
        let init_ms = init_start.elapsed().as_secs_f64() * 1000.0;

        if regions.is_empty() {
            warn!("TvFilter::run_sweep called with no regions");
        }

        let coeffs = StepCoefficients {
            tau: self.params.primal_step_size,
            lambda: self.params.lambda,
            variant: self.params.variant,
        };
        let outcome = execute_sweep(original, solution, dual, regions, coeffs, self.parallel);

        let mut timing = TimingBreakdown::with_total(start.elapsed().as_secs_f64() * 1000.0);
        timing.record(StepState::Init.label(), init_ms);
        timing.stages.extend(outcome.timing.stages);

        self.sweeps_run += 1;
        self.previous_delta = Some(outcome.delta);
        self.last_records = outcome.records;
        self.last_timing = timing;
        Ok(outcome.delta)
    }

    /// [`run_sweep`](Self::run_sweep) plus a [`SweepReport`]; the energy is
    /// evaluated only when `with_energy` is set since it costs a full pass.
    pub fn run_sweep_with_report(
        &mut self,
        regions: &[Region],
        with_energy: bool,
    ) -> Result<SweepReport> {
        let delta = self.run_sweep(regions)?;
        Ok(SweepReport {
            sweep: self.sweeps_run,
            delta,
            energy: if with_energy { self.energy() } else { None },
            elapsed_ms: self.last_timing.total_ms,
            regions: self.last_records.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dual::Variant;
    use crate::grid::GridShape;

    fn spike_filter(params: TvParams) -> TvFilter {
        let shape = GridShape::new(vec![5]).unwrap();
        let f = ScalarGrid::from_vec(shape, vec![0.0, 0.0, 10.0, 0.0, 0.0]).unwrap();
        let mut filter = TvFilter::with_params(params).unwrap();
        filter.set_original_image(f);
        filter
    }

    #[test]
    fn sweep_without_image_fails() {
        let mut filter = TvFilter::new();
        let region = Region::new(vec![0], vec![1]);
        assert_eq!(
            filter.run_sweep(&[region]),
            Err(TvError::MissingOriginalImage)
        );
    }

    #[test]
    fn invalid_params_are_rejected_and_previous_kept() {
        let mut filter = TvFilter::new();
        let err = filter.configure(TvParams::new(-1.0, 0.1, Variant::PrimalDual));
        assert!(matches!(err, Err(TvError::InvalidConfiguration { name: "lambda", .. })));
        assert_eq!(filter.params(), &TvParams::default());
    }

    #[test]
    fn mismatched_dual_field_is_reported_at_sweep() {
        let mut filter = spike_filter(TvParams::default());
        filter.set_dual_field(VectorGrid::zeros(GridShape::new(vec![4]).unwrap()));
        let region = filter.full_region().unwrap();
        assert!(matches!(
            filter.run_sweep(&[region]),
            Err(TvError::ShapeMismatch { what: "dual field", .. })
        ));
        assert_eq!(filter.sweeps_run(), 0);
    }

    #[test]
    fn out_of_bounds_region_aborts_without_writes() {
        let mut filter = spike_filter(TvParams::new(1.0, 0.1, Variant::PrimalDual));
        let full = filter.full_region().unwrap();
        filter.run_sweep(&[full]).unwrap();
        let u_before = filter.solution().unwrap().clone();
        let x_before = filter.dual_field().unwrap().clone();

        let regions = [
            Region::new(vec![0], vec![3]),
            Region::new(vec![3], vec![3]),
        ];
        assert!(matches!(
            filter.run_sweep(&regions),
            Err(TvError::InvalidRegion { index: 1, .. })
        ));
        assert_eq!(filter.solution().unwrap(), &u_before);
        assert_eq!(filter.dual_field().unwrap(), &x_before);
        assert_eq!(filter.sweeps_run(), 1);
    }

    #[test]
    fn installed_dual_field_rebuilds_the_solution() {
        let mut filter = spike_filter(TvParams::new(1.0, 0.1, Variant::PrimalDual));
        let shape = GridShape::new(vec![5]).unwrap();
        let x = VectorGrid::from_vec(shape, vec![0.0, -1.0, 1.0, 0.0, 0.0]).unwrap();
        filter.set_dual_field(x);
        let full = filter.full_region().unwrap();
        filter.run_sweep(&[full]).unwrap();
        // Starts from u = [0, 1, 8, 1, 0], so the smoothing reaches the edges.
        let u = filter.solution().unwrap().as_slice();
        let expected = [0.1, 0.9, 8.0, 0.9, 0.1];
        for (got, want) in u.iter().zip(expected) {
            assert!((got - want).abs() < 1e-5, "got {u:?}, expected {expected:?}");
        }
        assert!(filter.dual_field().unwrap().max_norm() <= 1.0 + 1e-6);
    }

    #[test]
    fn reset_dual_restarts_from_the_observation() {
        let mut filter = spike_filter(TvParams::new(1.0, 0.1, Variant::PrimalDual));
        let full = filter.full_region().unwrap();
        filter.run_sweep(&[full.clone()]).unwrap();
        filter.run_sweep(&[full.clone()]).unwrap();
        filter.reset_dual();
        assert_eq!(filter.previous_delta(), None);
        filter.run_sweep(&[full]).unwrap();
        assert_eq!(
            filter.solution().unwrap().as_slice(),
            &[0.0, 1.0, 8.0, 1.0, 0.0]
        );
    }

    #[test]
    fn empty_region_list_reports_zero_delta() {
        let mut filter = spike_filter(TvParams::default());
        assert_eq!(filter.run_sweep(&[]).unwrap(), 0.0);
        assert_eq!(filter.solution().unwrap(), filter.original_image().unwrap());
    }

    #[test]
    fn report_carries_records_and_energy() {
        let mut filter = spike_filter(TvParams::new(1.0, 0.1, Variant::PrimalDual));
        let regions = filter.split_regions(2).unwrap();
        let report = filter.run_sweep_with_report(&regions, true).unwrap();
        assert_eq!(report.sweep, 1);
        assert_eq!(report.regions.len(), 2);
        let energy = report.energy.unwrap();
        // u = [0,1,8,1,0]: ½·(1+4+1) + TV 16
        assert!((energy - 19.0).abs() < 1e-4, "energy={energy}");
    }
}
