//! Stateful TV filter and its parameters.
//!
//! - [`params`]: `TvParams` (λ, step size, variant) with validation.
//! - `instance`: [`TvFilter`], which owns the solution and dual field and
//!   runs one sweep per call over caller-supplied regions.
//!
//! Lifecycle: `configure` → `set_original_image` → repeated `run_sweep`.
//! The first sweep zero-fills the dual field (unless one was installed) and
//! initializes `u = f − λ·div X`; later sweeps continue from the stored state.

mod instance;
pub mod params;

pub use instance::TvFilter;
pub use params::TvParams;
