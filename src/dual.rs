//! Per-cell dual update keeping the dual field inside the unit ball.
//!
//! Both rules consume the primal gradient `∇u` at the cell, where
//! `u = f − λ·div X_old` is maintained by the filter:
//!
//! - [`Variant::PrimalDual`]: `X_new = P(X_old − (τ/λ)·∇u)`, `P(y) = y / max(1, |y|)`.
//! - [`Variant::Chambolle`]: `X_new = (X_old + τ·g) / (1 + τ·|g|)` with
//!   `g = ∇(div X_old − f/λ) = −∇u / λ`.
//!
//! Both steps scale `∇u` by `1/λ`, so the stable range of `τ` does not
//! depend on `λ`. Denominators never drop below one, so a zero gradient is
//! always safe.
use serde::{Deserialize, Serialize};

/// Dual update rule, fixed per filter configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Variant {
    /// Projected dual ascent with a Euclidean clamp (default).
    #[default]
    PrimalDual,
    /// Chambolle's semi-implicit fixed-point iteration.
    Chambolle,
}

impl Variant {
    /// Compute the new dual vector for one cell into `out` and return
    /// `|X_new − X_old|`.
    ///
    /// `x_old`, `grad_u` and `out` all have one entry per axis.
    #[inline]
    pub fn project(
        self,
        x_old: &[f32],
        grad_u: &[f32],
        tau: f32,
        lambda: f32,
        out: &mut [f32],
    ) -> f32 {
        match self {
            Variant::PrimalDual => project_primal_dual(x_old, grad_u, tau, lambda, out),
            Variant::Chambolle => project_chambolle(x_old, grad_u, tau, lambda, out),
        }
        change_norm(x_old, out)
    }
}

#[inline]
fn norm(v: &[f32]) -> f32 {
    v.iter().map(|c| c * c).sum::<f32>().sqrt()
}

#[inline]
fn change_norm(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (y - x) * (y - x))
        .sum::<f32>()
        .sqrt()
}

fn project_primal_dual(x_old: &[f32], grad_u: &[f32], tau: f32, lambda: f32, out: &mut [f32]) {
    let step = tau / lambda;
    for ((o, &x), &g) in out.iter_mut().zip(x_old).zip(grad_u) {
        *o = x - step * g;
    }
    let scale = norm(out).max(1.0);
    for o in out.iter_mut() {
        *o /= scale;
    }
}

fn project_chambolle(x_old: &[f32], grad_u: &[f32], tau: f32, lambda: f32, out: &mut [f32]) {
    // g = ∇(div X − f/λ) = −∇u/λ
    let inv_lambda = 1.0 / lambda;
    let g_norm = norm(grad_u) * inv_lambda;
    let denom = 1.0 + tau * g_norm;
    for ((o, &x), &gu) in out.iter_mut().zip(x_old).zip(grad_u) {
        *o = (x - tau * gu * inv_lambda) / denom;
    }
}
