//! N-dimensional regular grids shared by the scalar and vector fields.
//!
//! - [`GridShape`]: per-axis extents and linear strides (axis 0 fastest).
//! - [`ScalarGrid`]: one `f32` per cell (observed image, solution).
//! - [`VectorGrid`]: one N-vector per cell (dual field).
//! - [`Region`]: axis-aligned sub-block processed by one sweep task.

pub mod region;
pub mod scalar;
pub mod shape;
pub mod vector;

pub use region::{Region, RegionOffsets};
pub use scalar::ScalarGrid;
pub use shape::GridShape;
pub use vector::VectorGrid;
