//! Solver parameters.
//!
//! Defaults: `lambda = 1`, `primal_step_size = 0.125`, `variant = PrimalDual`.
//! Both dual steps are normalized by `λ`, so stability depends on `τ` alone:
//! `τ ≤ 1/(2N)` for the projected update and `τ ≤ 1/(4N)` for Chambolle on
//! an `N`-D grid. The default of 1/8 is stable for both on 2-D grids.

use crate::dual::Variant;
use crate::error::{Result, TvError};
use serde::{Deserialize, Serialize};

/// Configuration of a [`TvFilter`](crate::TvFilter), fixed between sweeps.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TvParams {
    /// Fidelity / regularization balance; larger values smooth more.
    pub lambda: f32,
    /// Dual step `τ`.
    pub primal_step_size: f32,
    /// Dual update rule.
    pub variant: Variant,
}

impl Default for TvParams {
    fn default() -> Self {
        Self {
            lambda: 1.0,
            primal_step_size: 0.125,
            variant: Variant::PrimalDual,
        }
    }
}

impl TvParams {
    pub fn new(lambda: f32, primal_step_size: f32, variant: Variant) -> Self {
        Self {
            lambda,
            primal_step_size,
            variant,
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Both scalars must be positive and finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("lambda", self.lambda),
            ("primalStepSize", self.primal_step_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TvError::InvalidConfiguration { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(TvParams::default().validate().is_ok());
    }

    #[test]
    fn non_positive_or_nan_values_are_rejected() {
        let bad = [
            TvParams::new(0.0, 0.1, Variant::PrimalDual),
            TvParams::new(-1.0, 0.1, Variant::PrimalDual),
            TvParams::new(1.0, 0.0, Variant::Chambolle),
            TvParams::new(1.0, f32::NAN, Variant::Chambolle),
            TvParams::new(f32::INFINITY, 0.1, Variant::PrimalDual),
        ];
        for params in bad {
            assert!(
                matches!(params.validate(), Err(TvError::InvalidConfiguration { .. })),
                "expected rejection for {params:?}"
            );
        }
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params: TvParams = serde_json::from_str(r#"{ "variant": "chambolle" }"#).unwrap();
        assert_eq!(params.variant, Variant::Chambolle);
        assert_eq!(params.lambda, 1.0);
        assert_eq!(params.primal_step_size, 0.125);
    }
}
