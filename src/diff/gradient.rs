//! Forward-difference gradient with Neumann boundaries.
//!
//! Along axis `k` the component is `s(cell + e_k) − s(cell)`, or `0` on the
//! last cell of that axis (no flux across the domain edge).
use crate::grid::{ScalarGrid, VectorGrid};

/// Gradient of `field` at a linear `offset`, written into `out` (len = ndim).
#[inline]
pub fn gradient_at(field: &ScalarGrid, offset: usize, out: &mut [f32]) {
    let shape = field.shape();
    let data = field.as_slice();
    let here = data[offset];
    for (axis, g) in out.iter_mut().enumerate() {
        *g = if shape.has_next(offset, axis) {
            data[offset + shape.strides()[axis]] - here
        } else {
            0.0
        };
    }
}

/// Gradient of the whole field.
pub fn gradient_field(field: &ScalarGrid) -> VectorGrid {
    let mut out = VectorGrid::zeros(field.shape().clone());
    for offset in 0..field.shape().len() {
        gradient_at(field, offset, out.cell_mut(offset));
    }
    out
}
