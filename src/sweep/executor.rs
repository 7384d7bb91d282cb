//! One sweep across a list of regions: validate, dual pass, primal pass,
//! reduce.
use super::parallel::{map_regions, ParallelSweepOptions};
use super::reduce::{reduce_max, RegionChangeRecord};
use super::step::{
    dual_pass, primal_pass, write_dual, write_primal, StepCoefficients, StepState,
};
use crate::diagnostics::TimingBreakdown;
use crate::error::Result;
use crate::grid::{GridShape, Region, ScalarGrid, VectorGrid};
use log::debug;
use std::time::Instant;

/// Result of a completed sweep.
#[derive(Clone, Debug)]
pub struct SweepOutcome {
    /// Reduced change magnitude (max over regions).
    pub delta: f32,
    /// Per-region records in region-list order.
    pub records: Vec<RegionChangeRecord>,
    pub timing: TimingBreakdown,
}

/// Reject regions of the wrong rank, outside the grid, or overlapping another
/// region. Runs before anything is written, so a rejected sweep leaves the
/// fields untouched.
pub fn validate_regions(shape: &GridShape, regions: &[Region]) -> Result<()> {
    for (i, region) in regions.iter().enumerate() {
        region.validate(shape, i)?;
    }
    for (i, a) in regions.iter().enumerate() {
        if let Some(j) = regions[i + 1..].iter().position(|b| a.overlaps(b)) {
            return Err(regions[i + 1 + j].invalid(i + 1 + j, "overlaps another region"));
        }
    }
    Ok(())
}

/// Execute the dual and primal passes over pre-validated `regions`.
///
/// Each pass collects every region's buffer before any write, which is the
/// read-before-write barrier that keeps results independent of the partition.
pub fn execute_sweep(
    original: &ScalarGrid,
    solution: &mut ScalarGrid,
    dual: &mut VectorGrid,
    regions: &[Region],
    coeffs: StepCoefficients,
    parallel: ParallelSweepOptions,
) -> SweepOutcome {
    let total_start = Instant::now();
    let mut timing = TimingBreakdown::default();

    let dual_start = Instant::now();
    let dual_outputs = {
        let (u, x) = (&*solution, &*dual);
        map_regions(regions, parallel, |i, region| dual_pass(i, region, u, x, coeffs))
    };
    let mut records = Vec::with_capacity(regions.len());
    for (region, out) in regions.iter().zip(dual_outputs) {
        write_dual(dual, region, &out.values);
        records.push(out.record);
    }
    timing.record(
        StepState::UpdateDual.label(),
        dual_start.elapsed().as_secs_f64() * 1000.0,
    );

    let primal_start = Instant::now();
    let primal_outputs = {
        let x = &*dual;
        map_regions(regions, parallel, |_, region| {
            primal_pass(region, original, x, coeffs.lambda)
        })
    };
    for (region, values) in regions.iter().zip(primal_outputs) {
        write_primal(solution, region, &values);
    }
    timing.record(
        StepState::ComputePrimal.label(),
        primal_start.elapsed().as_secs_f64() * 1000.0,
    );

    let delta = reduce_max(&records);
    timing.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "sweep: regions={} delta={:.6e} dual_ms={:.3} primal_ms={:.3}",
        regions.len(),
        delta,
        timing.stage_ms(StepState::UpdateDual.label()),
        timing.stage_ms(StepState::ComputePrimal.label())
    );

    SweepOutcome {
        delta,
        records,
        timing,
    }
}
