use super::timing::TimingBreakdown;
use crate::dual::Variant;
use crate::sweep::RegionChangeRecord;
use serde::Serialize;

/// Shape and configuration of a denoising run, for reports.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub dims: Vec<usize>,
    pub lambda: f32,
    pub primal_step_size: f32,
    pub variant: Variant,
    pub regions: usize,
}

/// Diagnostics for one completed sweep.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    /// 1-based sweep number within the filter's lifetime.
    pub sweep: usize,
    pub delta: f32,
    /// ROF energy of the solution after the sweep, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<RegionChangeRecord>,
}

/// Outcome of a stopping loop run by [`crate::driver::Denoiser`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DenoiseReport {
    pub input: InputDescriptor,
    pub sweeps: usize,
    pub converged: bool,
    pub final_delta: f32,
    pub timings: TimingBreakdown,
    pub history: Vec<SweepReport>,
}

impl DenoiseReport {
    /// Energy after the last sweep, if energies were tracked.
    pub fn final_energy(&self) -> Option<f64> {
        self.history.last().and_then(|s| s.energy)
    }
}
