//! Region dispatch: sequential or Rayon-backed.
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How the regions of one sweep pass are dispatched.
///
/// Results never depend on this choice: every pass writes into region-local
/// buffers that are committed only after all regions finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParallelSweepOptions {
    /// Hand regions to Rayon. Ignored without the `parallel` feature.
    pub enabled: bool,
    /// Region plans smaller than this run inline on the calling thread.
    pub min_regions: usize,
}

impl ParallelSweepOptions {
    /// Rayon dispatch for plans of at least `min_regions` regions (clamped to 1).
    pub fn threaded(min_regions: usize) -> Self {
        Self {
            enabled: true,
            min_regions: min_regions.max(1),
        }
    }

    /// Always run regions one after another.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            min_regions: usize::MAX,
        }
    }

    /// Whether a plan of `region_count` regions goes to Rayon.
    pub fn uses_rayon(&self, region_count: usize) -> bool {
        cfg!(feature = "parallel") && self.enabled && region_count >= self.min_regions.max(1)
    }
}

impl Default for ParallelSweepOptions {
    fn default() -> Self {
        Self {
            enabled: cfg!(feature = "parallel"),
            min_regions: 2,
        }
    }
}

/// Apply `task` to every `(index, item)` and collect the results in input
/// order. Returning from this function is the barrier between sweep passes.
pub fn map_regions<T, R, F>(items: &[T], options: ParallelSweepOptions, task: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &T) -> R + Sync + Send,
{
    if options.uses_rayon(items.len()) {
        #[cfg(feature = "parallel")]
        {
            return items
                .par_iter()
                .enumerate()
                .map(|(i, item)| task(i, item))
                .collect();
        }
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| task(i, item))
        .collect()
}
