//! Owned single-channel f32 field over a [`GridShape`].
//!
//! Used for both the observed image `f` and the solution `u`. Storage is a
//! flat `Vec<f32>` in the shape's linear order.
use super::shape::GridShape;
use crate::error::{Result, TvError};

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarGrid {
    shape: GridShape,
    data: Vec<f32>,
}

impl ScalarGrid {
    /// Construct a zero-initialized field.
    pub fn zeros(shape: GridShape) -> Self {
        let data = vec![0.0; shape.len()];
        Self { shape, data }
    }

    /// Construct a field filled with `value`.
    pub fn filled(shape: GridShape, value: f32) -> Self {
        let data = vec![value; shape.len()];
        Self { shape, data }
    }

    /// Wrap existing samples; `data.len()` must equal the cell count.
    pub fn from_vec(shape: GridShape, data: Vec<f32>) -> Result<Self> {
        if data.len() != shape.len() {
            return Err(TvError::InvalidGrid(format!(
                "expected {} samples for dims {:?}, got {}",
                shape.len(),
                shape.dims(),
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    #[inline]
    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    #[inline]
    /// Value at an N-D index.
    pub fn get(&self, index: &[usize]) -> f32 {
        self.data[self.shape.offset(index)]
    }

    #[inline]
    /// Set the value at an N-D index.
    pub fn set(&mut self, index: &[usize], v: f32) {
        let i = self.shape.offset(index);
        self.data[i] = v;
    }

    /// Largest absolute per-cell difference to `other` (same shape assumed).
    pub fn max_abs_diff(&self, other: &ScalarGrid) -> f32 {
        self.data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }
}
