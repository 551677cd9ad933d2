//! Deterministic synthetic dataset generation.
//!
//! Observations are a fixed smooth signal plus seeded Gaussian noise:
//!
//! ```text
//! y(t) = 0.3 sin(t - 1) + 0.5 cos(2t) + N(0, σ)
//! ```
//!
//! The same seed and settings always produce the same dataset, which makes
//! sample runs and golden outputs reproducible.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::Dataset;
use crate::error::AppError;

/// Settings for the sample generator.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub count: usize,
    pub seed: u64,
    pub t_min: f64,
    pub t_max: f64,
    pub noise_sigma: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            count: 100,
            seed: 42,
            t_min: 0.0,
            t_max: 10.0,
            noise_sigma: 0.3,
        }
    }
}

/// The noise-free signal underlying the synthetic sample.
pub fn true_signal(t: f64) -> f64 {
    0.3 * (t - 1.0).sin() + 0.5 * (2.0 * t).cos()
}

/// Generate a noisy sample of the signal on an evenly spaced grid.
pub fn generate_sample(config: &SampleConfig) -> Result<Dataset, AppError> {
    if config.count < 2 {
        return Err(AppError::validation("Sample count must be >= 2."));
    }
    if !(config.t_min.is_finite() && config.t_max.is_finite() && config.t_max > config.t_min) {
        return Err(AppError::validation(format!(
            "Invalid sample range: [{}, {}].",
            config.t_min, config.t_max
        )));
    }
    if !(config.noise_sigma.is_finite() && config.noise_sigma >= 0.0) {
        return Err(AppError::validation(format!(
            "Invalid noise sigma: {}.",
            config.noise_sigma
        )));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise_sigma.max(f64::MIN_POSITIVE))
        .map_err(|e| AppError::validation(format!("Noise distribution error: {e}")))?;

    let n = config.count;
    let mut t = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let ti = config.t_min + u * (config.t_max - config.t_min);
        let noise = if config.noise_sigma > 0.0 {
            normal.sample(&mut rng)
        } else {
            0.0
        };
        t.push(ti);
        y.push(true_signal(ti) + noise);
    }

    Dataset::new(t, y)
}
