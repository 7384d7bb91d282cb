use crate::driver::StopCriteria;
use crate::filter::TvParams;
use crate::sweep::ParallelSweepOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// JSON configuration of the `tv_denoise` tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenoiseToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub params: TvParams,
    #[serde(default)]
    pub stop: StopCriteria,
    /// Number of slabs the image is split into for each sweep.
    #[serde(default = "default_regions")]
    pub regions: usize,
    #[serde(default)]
    pub parallel: ParallelSweepOptions,
    pub output: DenoiseOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenoiseOutputConfig {
    pub image: PathBuf,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

fn default_regions() -> usize {
    8
}

pub fn parse_config(data: &str, origin: &Path) -> Result<DenoiseToolConfig, String> {
    let config: DenoiseToolConfig = serde_json::from_str(data)
        .map_err(|e| format!("Failed to parse config {}: {e}", origin.display()))?;
    config
        .params
        .validate()
        .map_err(|e| format!("Invalid params in {}: {e}", origin.display()))?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<DenoiseToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dual::Variant;

    #[test]
    fn minimal_config_uses_defaults() {
        let json = r#"{ "input": "in.png", "output": { "image": "out.png" } }"#;
        let cfg = parse_config(json, Path::new("inline")).unwrap();
        assert_eq!(cfg.regions, 8);
        assert_eq!(cfg.params, TvParams::default());
        assert_eq!(cfg.stop, StopCriteria::default());
        assert!(cfg.output.report_json.is_none());
    }

    #[test]
    fn full_config_is_parsed() {
        let json = r#"{
            "input": "noisy.png",
            "params": { "lambda": 0.08, "primalStepSize": 0.1, "variant": "chambolle" },
            "stop": { "tolerance": 0.0005, "maxSweeps": 50, "trackEnergy": true },
            "regions": 4,
            "parallel": { "enabled": false, "minRegions": 2 },
            "output": { "image": "out/denoised.png", "reportJson": "out/report.json" }
        }"#;
        let cfg = parse_config(json, Path::new("inline")).unwrap();
        assert_eq!(cfg.params.variant, Variant::Chambolle);
        assert_eq!(cfg.stop.max_sweeps, 50);
        assert!(cfg.stop.track_energy);
        assert_eq!(cfg.regions, 4);
        assert!(!cfg.parallel.uses_rayon(100));
        assert_eq!(
            cfg.output.report_json.as_deref(),
            Some(Path::new("out/report.json"))
        );
    }

    #[test]
    fn invalid_lambda_is_reported() {
        let json = r#"{ "input": "a.png", "params": { "lambda": 0 }, "output": { "image": "b.png" } }"#;
        let err = parse_config(json, Path::new("inline")).unwrap_err();
        assert!(err.contains("lambda"), "unexpected error: {err}");
    }
}
