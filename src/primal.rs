//! Primal reconstruction `u = f − λ·div X`.
//!
//! Shared by both dual variants. The updater only sees the divergence value,
//! never the dual field itself.
use crate::diff::divergence_at;
use crate::grid::{ScalarGrid, VectorGrid};

/// Primal value for one cell from the observed value and the dual divergence.
#[inline]
pub fn primal_value(original: f32, dual_divergence: f32, lambda: f32) -> f32 {
    original - lambda * dual_divergence
}

/// Rebuild the whole solution from the observation and the dual field.
///
/// All three fields must share a shape.
pub fn reconstruct_into(
    solution: &mut ScalarGrid,
    original: &ScalarGrid,
    dual: &VectorGrid,
    lambda: f32,
) {
    let f = original.as_slice();
    for (offset, u) in solution.as_mut_slice().iter_mut().enumerate() {
        *u = primal_value(f[offset], divergence_at(dual, offset), lambda);
    }
}
