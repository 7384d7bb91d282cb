//! Owned vector field with one N-component vector per cell.
//!
//! Components are interleaved (`data[offset * N + axis]`) so that the per-cell
//! normalization of the dual field touches one contiguous chunk.
use super::shape::GridShape;
use crate::error::{Result, TvError};

#[derive(Clone, Debug, PartialEq)]
pub struct VectorGrid {
    shape: GridShape,
    data: Vec<f32>,
}

impl VectorGrid {
    /// Zero vector at every cell; the vector dimension equals `shape.ndim()`.
    pub fn zeros(shape: GridShape) -> Self {
        let data = vec![0.0; shape.len() * shape.ndim()];
        Self { shape, data }
    }

    /// Wrap interleaved components; `data.len()` must be `cells × ndim`.
    pub fn from_vec(shape: GridShape, data: Vec<f32>) -> Result<Self> {
        let expected = shape.len() * shape.ndim();
        if data.len() != expected {
            return Err(TvError::InvalidGrid(format!(
                "expected {expected} components for dims {:?}, got {}",
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

    /// Number of components per cell.
    #[inline]
    pub fn components(&self) -> usize {
        self.shape.ndim()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Vector stored at a linear cell offset.
    #[inline]
    pub fn cell(&self, offset: usize) -> &[f32] {
        let n = self.components();
        &self.data[offset * n..(offset + 1) * n]
    }

    #[inline]
    pub fn cell_mut(&mut self, offset: usize) -> &mut [f32] {
        let n = self.components();
        &mut self.data[offset * n..(offset + 1) * n]
    }

    /// Component `axis` of the vector at `offset`.
    #[inline]
    pub fn component(&self, offset: usize, axis: usize) -> f32 {
        self.data[offset * self.components() + axis]
    }

    /// Largest Euclidean norm over all cells.
    pub fn max_norm(&self) -> f32 {
        self.data
            .chunks_exact(self.components().max(1))
            .map(|v| v.iter().map(|c| c * c).sum::<f32>().sqrt())
            .fold(0.0, f32::max)
    }

    pub fn fill_zero(&mut self) {
        self.data.iter_mut().for_each(|c| *c = 0.0);
    }
}
