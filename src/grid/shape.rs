//! Shape and linear layout of an N-dimensional regular grid.
//!
//! Cells are stored with axis 0 varying fastest, the same ordering as a
//! row-major image where `x` is axis 0 and `y` is axis 1.
use crate::error::{Result, TvError};

/// Extent of a grid along each axis plus the derived linear strides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridShape {
    dims: Vec<usize>,
    strides: Vec<usize>,
}

impl GridShape {
    /// Build a shape from per-axis extents. At least one axis is required.
    pub fn new(dims: Vec<usize>) -> Result<Self> {
        if dims.is_empty() {
            return Err(TvError::InvalidGrid(
                "a grid needs at least one axis".to_string(),
            ));
        }
        let mut strides = Vec::with_capacity(dims.len());
        let mut acc = 1usize;
        for &d in &dims {
            strides.push(acc);
            acc = acc.checked_mul(d).ok_or_else(|| {
                TvError::InvalidGrid(format!("cell count overflows for dims {dims:?}"))
            })?;
        }
        Ok(Self { dims, strides })
    }

    /// Convenience constructor for 2-D images (`width × height`).
    pub fn image(width: usize, height: usize) -> Self {
        Self {
            dims: vec![width, height],
            strides: vec![1, width],
        }
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear offset of an N-D index. The index must be in bounds.
    #[inline]
    pub fn offset(&self, index: &[usize]) -> usize {
        debug_assert_eq!(index.len(), self.ndim());
        index
            .iter()
            .zip(&self.strides)
            .map(|(&i, &s)| i * s)
            .sum()
    }

    /// Coordinate of a linear offset along `axis`.
    #[inline]
    pub fn coord(&self, offset: usize, axis: usize) -> usize {
        (offset / self.strides[axis]) % self.dims[axis]
    }

    /// Whether `offset` has a successor along `axis` (`cell + e_axis` in bounds).
    #[inline]
    pub fn has_next(&self, offset: usize, axis: usize) -> bool {
        self.coord(offset, axis) + 1 < self.dims[axis]
    }

    /// Whether `offset` has a predecessor along `axis` (`cell − e_axis` in bounds).
    #[inline]
    pub fn has_prev(&self, offset: usize, axis: usize) -> bool {
        self.coord(offset, axis) > 0
    }

    pub(crate) fn ensure_same(&self, other: &GridShape, what: &'static str) -> Result<()> {
        if self.dims == other.dims {
            Ok(())
        } else {
            Err(TvError::ShapeMismatch {
                what,
                expected: self.dims.clone(),
                found: other.dims.clone(),
            })
        }
    }
}
