#![allow(dead_code)]

use tv_denoise::{GridShape, ScalarGrid};

/// Deterministic values in `[-1, 1)` from a 64-bit LCG.
pub fn lcg_noise(seed: u64, n: usize) -> Vec<f32> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 40) as f32 / (1u64 << 24) as f32) * 2.0 - 1.0
        })
        .collect()
}

/// Constant `background` with a single `peak` cell at `at`.
pub fn spike(dims: &[usize], at: &[usize], background: f32, peak: f32) -> ScalarGrid {
    let shape = GridShape::new(dims.to_vec()).expect("valid dims");
    let mut grid = ScalarGrid::filled(shape, background);
    grid.set(at, peak);
    grid
}

/// Vertical step edge: `low` left of `split_x`, `high` from `split_x` on.
pub fn step_image(width: usize, height: usize, split_x: usize, low: f32, high: f32) -> ScalarGrid {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let data = (0..width * height)
        .map(|i| if i % width < split_x { low } else { high })
        .collect();
    ScalarGrid::from_vec(GridShape::image(width, height), data).expect("matching length")
}

/// `clean + amplitude · noise`, with noise from [`lcg_noise`].
pub fn with_noise(clean: &ScalarGrid, amplitude: f32, seed: u64) -> ScalarGrid {
    let noise = lcg_noise(seed, clean.shape().len());
    let data = clean
        .as_slice()
        .iter()
        .zip(noise)
        .map(|(&c, n)| c + amplitude * n)
        .collect();
    ScalarGrid::from_vec(clean.shape().clone(), data).expect("matching length")
}

pub fn mse(a: &ScalarGrid, b: &ScalarGrid) -> f64 {
    let n = a.shape().len().max(1) as f64;
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(&x, &y)| f64::from(x - y).powi(2))
        .sum::<f64>()
        / n
}
