//! Axis-aligned sub-regions of a grid and their cell iteration.
//!
//! A [`Region`] is an `origin` plus a `size` per axis (half-open extent
//! `origin..origin + size`). Sweeps receive a list of disjoint regions from the
//! caller; [`Region::split`] provides a simple slab partition for callers that
//! do not bring their own.
use super::shape::GridShape;
use crate::error::{Result, TvError};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// First cell index along each axis.
    pub origin: Vec<usize>,
    /// Number of cells along each axis.
    pub size: Vec<usize>,
}

impl Region {
    pub fn new(origin: Vec<usize>, size: Vec<usize>) -> Self {
        Self { origin, size }
    }

    /// Region covering the whole grid.
    pub fn full(shape: &GridShape) -> Self {
        Self {
            origin: vec![0; shape.ndim()],
            size: shape.dims().to_vec(),
        }
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.size.len()
    }

    /// Number of cells in the region.
    pub fn len(&self) -> usize {
        self.size.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that the region has the grid's dimensionality and lies inside it.
    /// `index` only labels the error.
    pub fn validate(&self, shape: &GridShape, index: usize) -> Result<()> {
        if self.origin.len() != shape.ndim() || self.size.len() != shape.ndim() {
            return Err(TvError::ShapeMismatch {
                what: "region dimensionality",
                expected: shape.dims().to_vec(),
                found: self.size.clone(),
            });
        }
        let inside = self
            .origin
            .iter()
            .zip(&self.size)
            .zip(shape.dims())
            .all(|((&o, &s), &d)| o.checked_add(s).is_some_and(|end| end <= d));
        if !inside {
            return Err(self.invalid(index, "extends outside the grid"));
        }
        Ok(())
    }

    /// True when both regions share at least one cell.
    pub fn overlaps(&self, other: &Region) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.origin
            .iter()
            .zip(&self.size)
            .zip(other.origin.iter().zip(&other.size))
            .all(|((&a0, &as_), (&b0, &bs))| a0 < b0 + bs && b0 < a0 + as_)
    }

    pub(crate) fn invalid(&self, index: usize, reason: &'static str) -> TvError {
        TvError::InvalidRegion {
            index,
            origin: self.origin.clone(),
            size: self.size.clone(),
            reason,
        }
    }

    /// Iterate the linear offsets of every cell, axis 0 fastest.
    ///
    /// The region must already be validated against `shape`.
    pub fn offsets<'a>(&'a self, shape: &'a GridShape) -> RegionOffsets<'a> {
        RegionOffsets {
            region: self,
            strides: shape.strides(),
            counter: vec![0; self.ndim()],
            next: (!self.is_empty()).then(|| shape.offset(&self.origin)),
        }
    }

    /// Split into at most `count` contiguous slabs along the slowest-varying
    /// axis that has more than one cell. Slab sizes differ by at most one.
    pub fn split(&self, count: usize) -> Vec<Region> {
        let count = count.max(1);
        let Some(axis) = (0..self.ndim()).rev().find(|&a| self.size[a] > 1) else {
            return vec![self.clone()];
        };
        let extent = self.size[axis];
        let pieces = count.min(extent);
        let base = extent / pieces;
        let extra = extent % pieces;
        let mut out = Vec::with_capacity(pieces);
        let mut start = self.origin[axis];
        for i in 0..pieces {
            let len = base + usize::from(i < extra);
            let mut origin = self.origin.clone();
            let mut size = self.size.clone();
            origin[axis] = start;
            size[axis] = len;
            out.push(Region { origin, size });
            start += len;
        }
        out
    }
}

/// Iterator over the linear offsets of a region's cells.
pub struct RegionOffsets<'a> {
    region: &'a Region,
    strides: &'a [usize],
    counter: Vec<usize>,
    next: Option<usize>,
}

impl Iterator for RegionOffsets<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        // Advance the N-D counter like an odometer.
        let mut offset = current;
        for axis in 0..self.counter.len() {
            self.counter[axis] += 1;
            offset += self.strides[axis];
            if self.counter[axis] < self.region.size[axis] {
                self.next = Some(offset);
                return Some(current);
            }
            offset -= self.counter[axis] * self.strides[axis];
            self.counter[axis] = 0;
        }
        self.next = None;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.next.is_none() {
            return (0, Some(0));
        }
        let mut done = 0usize;
        let mut block = 1usize;
        for (c, s) in self.counter.iter().zip(&self.region.size) {
            done += c * block;
            block *= s;
        }
        let left = block - done;
        (left, Some(left))
    }
}

impl ExactSizeIterator for RegionOffsets<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_visit_region_cells_in_order() {
        let shape = GridShape::image(4, 3);
        let region = Region::new(vec![1, 1], vec![2, 2]);
        let offsets: Vec<usize> = region.offsets(&shape).collect();
        assert_eq!(offsets, vec![5, 6, 9, 10]);
        assert_eq!(region.offsets(&shape).len(), 4);
    }

    #[test]
    fn full_region_covers_every_cell() {
        let shape = GridShape::new(vec![3, 2, 2]).unwrap();
        let offsets: Vec<usize> = Region::full(&shape).offsets(&shape).collect();
        assert_eq!(offsets, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn empty_region_yields_nothing() {
        let shape = GridShape::image(4, 3);
        let region = Region::new(vec![0, 0], vec![0, 3]);
        assert_eq!(region.offsets(&shape).count(), 0);
        assert!(region.validate(&shape, 0).is_ok());
    }

    #[test]
    fn validate_rejects_out_of_bounds_and_wrong_rank() {
        let shape = GridShape::image(4, 3);
        let outside = Region::new(vec![2, 0], vec![3, 3]);
        assert!(matches!(
            outside.validate(&shape, 7),
            Err(TvError::InvalidRegion { index: 7, .. })
        ));
        let wrong_rank = Region::new(vec![0], vec![4]);
        assert!(matches!(
            wrong_rank.validate(&shape, 0),
            Err(TvError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn split_produces_disjoint_cover_along_slowest_axis() {
        let shape = GridShape::image(5, 7);
        let parts = Region::full(&shape).split(3);
        assert_eq!(parts.len(), 3);
        assert_eq!(
            parts.iter().map(|r| r.size[1]).collect::<Vec<_>>(),
            vec![3, 2, 2]
        );
        let mut seen: Vec<usize> = parts.iter().flat_map(|r| r.offsets(&shape)).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..35).collect::<Vec<_>>());
        for (i, a) in parts.iter().enumerate() {
            for b in &parts[i + 1..] {
                assert!(!a.overlaps(b));
            }
        }
    }

    #[test]
    fn split_falls_back_to_faster_axis_and_caps_count() {
        let shape = GridShape::image(4, 1);
        let parts = Region::full(&shape).split(10);
        assert_eq!(parts.len(), 4);
        assert!(parts.iter().all(|r| r.size == vec![1, 1]));
    }

    #[test]
    fn overlap_detection() {
        let a = Region::new(vec![0, 0], vec![2, 2]);
        let b = Region::new(vec![1, 1], vec![2, 2]);
        let c = Region::new(vec![2, 0], vec![2, 2]);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
