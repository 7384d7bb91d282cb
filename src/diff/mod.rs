//! Discrete differential operators over [`crate::grid`] fields.
//!
//! - [`gradient_at`] / [`gradient_field`]: forward differences, Neumann edges.
//! - [`divergence_at`] / [`divergence_field`]: backward differences, exact
//!   negative adjoint of the gradient.
//! - [`total_variation`] and [`energy`]: the isotropic TV seminorm and the
//!   ROF objective `½·Σ(u − f)² + λ·TV(u)`, used for diagnostics.
//!
//! The sign convention matters: the solver converges to the TV minimizer only
//! because `Σ div(v)·s = −Σ v·∇s` holds exactly on every grid.

pub mod divergence;
pub mod gradient;

pub use divergence::{divergence_at, divergence_field};
pub use gradient::{gradient_at, gradient_field};

use crate::grid::ScalarGrid;

/// Isotropic total variation `Σ |∇u|`, accumulated in f64.
pub fn total_variation(field: &ScalarGrid) -> f64 {
    let mut g = vec![0.0f32; field.shape().ndim()];
    let mut tv = 0.0f64;
    for offset in 0..field.shape().len() {
        gradient_at(field, offset, &mut g);
        tv += f64::from(g.iter().map(|c| c * c).sum::<f32>().sqrt());
    }
    tv
}

/// ROF energy of `u` for observation `f` and fidelity weight `lambda`.
///
/// Both grids are expected to share a shape.
pub fn energy(u: &ScalarGrid, f: &ScalarGrid, lambda: f32) -> f64 {
    let fidelity: f64 = u
        .as_slice()
        .iter()
        .zip(f.as_slice())
        .map(|(&a, &b)| {
            let d = f64::from(a - b);
            d * d
        })
        .sum();
    0.5 * fidelity + f64::from(lambda) * total_variation(u)
}
