//! Work performed by one region during one sweep.
//!
//! A sweep runs the region step in two passes so that no region ever reads a
//! neighbor cell that another region has already overwritten in this sweep:
//!
//! 1. [`dual_pass`]: `∇u` and the projected dual for every cell of the region,
//!    computed from the previous sweep's `u` and `X` into a local buffer.
//! 2. [`primal_pass`]: `div X_new` and `u = f − λ·div X_new` for every cell,
//!    computed after all dual buffers were written back.
//!
//! The passes return owned buffers; [`write_dual`] / [`write_primal`] copy them
//! into the shared fields once every region has finished.
use super::reduce::RegionChangeRecord;
use crate::diff::{divergence_at, gradient_at};
use crate::dual::Variant;
use crate::grid::{Region, ScalarGrid, VectorGrid};
use crate::primal::primal_value;

/// Sweep stages, in execution order. The gradient is computed inside
/// `UpdateDual`, one cell at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepState {
    Init,
    UpdateDual,
    ComputePrimal,
}

impl StepState {
    pub fn label(self) -> &'static str {
        match self {
            StepState::Init => "init",
            StepState::UpdateDual => "update_dual",
            StepState::ComputePrimal => "compute_primal",
        }
    }
}

/// Scalars driving the dual update.
#[derive(Clone, Copy, Debug)]
pub struct StepCoefficients {
    pub tau: f32,
    pub lambda: f32,
    pub variant: Variant,
}

/// New dual vectors for one region (interleaved, region order) and its record.
#[derive(Debug)]
pub struct DualPassOutput {
    pub values: Vec<f32>,
    pub record: RegionChangeRecord,
}

/// Gradient + dual projection over `region`.
pub fn dual_pass(
    index: usize,
    region: &Region,
    solution: &ScalarGrid,
    dual: &VectorGrid,
    coeffs: StepCoefficients,
) -> DualPassOutput {
    let shape = solution.shape();
    let n = shape.ndim();
    let mut values = vec![0.0f32; region.len() * n];
    let mut grad = vec![0.0f32; n];
    let mut max_change = 0.0f32;

    for (out, offset) in values.chunks_exact_mut(n).zip(region.offsets(shape)) {
        gradient_at(solution, offset, &mut grad);
        let change = coeffs.variant.project(
            dual.cell(offset),
            &grad,
            coeffs.tau,
            coeffs.lambda,
            out,
        );
        max_change = max_change.max(change);
    }

    DualPassOutput {
        values,
        record: RegionChangeRecord {
            region: index,
            cells: region.len(),
            max_change,
        },
    }
}

/// Primal reconstruction over `region` from the (already updated) dual field.
pub fn primal_pass(
    region: &Region,
    original: &ScalarGrid,
    dual: &VectorGrid,
    lambda: f32,
) -> Vec<f32> {
    let f = original.as_slice();
    region
        .offsets(original.shape())
        .map(|offset| primal_value(f[offset], divergence_at(dual, offset), lambda))
        .collect()
}

pub fn write_dual(dual: &mut VectorGrid, region: &Region, values: &[f32]) {
    let n = dual.components();
    let shape = dual.shape().clone();
    for (src, offset) in values.chunks_exact(n).zip(region.offsets(&shape)) {
        dual.cell_mut(offset).copy_from_slice(src);
    }
}

pub fn write_primal(solution: &mut ScalarGrid, region: &Region, values: &[f32]) {
    let shape = solution.shape().clone();
    let data = solution.as_mut_slice();
    for (&v, offset) in values.iter().zip(region.offsets(&shape)) {
        data[offset] = v;
    }
}
