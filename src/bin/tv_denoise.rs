use std::env;
use std::path::Path;
use std::time::Instant;
use tv_denoise::config::denoise::load_config;
use tv_denoise::image::{load_grayscale_grid, save_grayscale_grid, write_json_file};
use tv_denoise::Denoiser;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let load_start = Instant::now();
    let noisy = load_grayscale_grid(&config.input)?;
    let load_ms = load_start.elapsed().as_secs_f64() * 1000.0;
    let dims = noisy.shape().dims().to_vec();

    let mut denoiser = Denoiser::new(noisy, config.params, config.regions)
        .map_err(|e| e.to_string())?
        .with_parallel(config.parallel);
    let mut report = denoiser.run(&config.stop).map_err(|e| e.to_string())?;
    report.timings.record("load_image", load_ms);

    let region_count = denoiser.regions().len();
    let filter = denoiser.into_filter();
    let solution = filter
        .solution()
        .or_else(|| filter.original_image())
        .ok_or("Filter has no image")?;
    let save_start = Instant::now();
    save_grayscale_grid(solution, &config.output.image)?;
    report
        .timings
        .record("save_image", save_start.elapsed().as_secs_f64() * 1000.0);

    println!(
        "dims={:?} regions={} sweeps={} converged={} delta={:.3e} total_ms={:.1}",
        dims,
        region_count,
        report.sweeps,
        report.converged,
        report.final_delta,
        report.timings.total_ms
    );
    println!("Saved denoised image to {}", config.output.image.display());

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
        println!("Saved report to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: tv_denoise <config.json>".to_string()
}
