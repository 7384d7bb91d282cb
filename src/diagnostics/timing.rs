//! Wall-clock timings of sweep stages.
//!
//! Labels used by the solver are `init`, `update_dual` and `compute_primal`;
//! the tool adds `load_image` and `save_image`. A breakdown holds at most one
//! entry per label, so per-sweep breakdowns fold into run totals.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Per-label stage times plus the wall-clock total, which also covers work
/// outside any labelled stage.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    /// Add `elapsed_ms` to the stage `label`, creating it on first use.
    pub fn record(&mut self, label: &str, elapsed_ms: f64) {
        match self.stages.iter_mut().find(|s| s.label == label) {
            Some(stage) => stage.elapsed_ms += elapsed_ms,
            None => self.stages.push(StageTiming {
                label: label.to_owned(),
                elapsed_ms,
            }),
        }
    }

    /// Time spent in `label`, zero if the stage never ran.
    pub fn stage_ms(&self, label: &str) -> f64 {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map_or(0.0, |s| s.elapsed_ms)
    }

    /// Fold a per-sweep breakdown into a run total.
    pub fn accumulate(&mut self, other: &TimingBreakdown) {
        self.total_ms += other.total_ms;
        for stage in &other.stages {
            self.record(&stage.label, stage.elapsed_ms);
        }
    }
}
