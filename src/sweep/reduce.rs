//! Reduction of per-region change records into the sweep's `delta`.
use serde::Serialize;

/// Largest per-cell dual change observed by one region during one sweep.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionChangeRecord {
    /// Position of the region in the sweep's region list.
    pub region: usize,
    /// Cells processed.
    pub cells: usize,
    /// `max |X_new − X_old|` over the region's cells.
    pub max_change: f32,
}

/// Maximum of the regional maxima; `0` when there are no records.
///
/// NaN records are skipped by `f32::max`, matching the solver's lack of
/// numerical failure detection.
pub fn reduce_max<'a, I>(records: I) -> f32
where
    I: IntoIterator<Item = &'a RegionChangeRecord>,
{
    records
        .into_iter()
        .map(|r| r.max_change)
        .fold(0.0, f32::max)
}
