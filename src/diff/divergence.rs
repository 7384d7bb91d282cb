//! Backward-difference divergence, the negative adjoint of [`gradient_at`].
//!
//! Along axis `k` the contribution is `v_k(cell) − v_k(cell − e_k)`. The
//! predecessor term is dropped on the first cell of the axis, and the `v_k(cell)`
//! term is dropped on the last cell, where the gradient component is always
//! zero. With these edges `Σ div(v)·s = −Σ v·∇s` holds for every `v`.
//!
//! [`gradient_at`]: super::gradient::gradient_at
use crate::grid::{ScalarGrid, VectorGrid};

/// Divergence of `field` at a linear `offset`.
#[inline]
pub fn divergence_at(field: &VectorGrid, offset: usize) -> f32 {
    let shape = field.shape();
    let mut sum = 0.0;
    for axis in 0..shape.ndim() {
        if shape.has_next(offset, axis) {
            sum += field.component(offset, axis);
        }
        if shape.has_prev(offset, axis) {
            sum -= field.component(offset - shape.strides()[axis], axis);
        }
    }
    sum
}

/// Divergence of the whole field.
pub fn divergence_field(field: &VectorGrid) -> ScalarGrid {
    let mut out = ScalarGrid::zeros(field.shape().clone());
    for (offset, d) in out.as_mut_slice().iter_mut().enumerate() {
        *d = divergence_at(field, offset);
    }
    out
}
