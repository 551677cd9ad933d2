//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting or prediction

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::model::SplineModel;

/// A set of scalar observations `(t_i, y_i)`.
///
/// The abscissas need not be sorted; duplicates are allowed.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub t: Vec<f64>,
    pub y: Vec<f64>,
}

impl Dataset {
    pub fn new(t: Vec<f64>, y: Vec<f64>) -> Result<Self, AppError> {
        let dataset = Self { t, y };
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Check the structural invariants required by the fitter.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.t.len() != self.y.len() {
            return Err(AppError::validation(format!(
                "Mismatched lengths: t has {} points, y has {}.",
                self.t.len(),
                self.y.len()
            )));
        }
        if self.t.len() < 2 {
            return Err(AppError::validation(
                "At least 2 observations are required.",
            ));
        }
        if self.t.iter().any(|v| !v.is_finite()) {
            return Err(AppError::validation("Non-finite abscissa in dataset."));
        }
        if self.y.iter().any(|v| !v.is_finite()) {
            return Err(AppError::validation("Non-finite observation in dataset."));
        }
        Ok(())
    }

    /// Summary statistics for reporting and plot ranges.
    pub fn stats(&self) -> DatasetStats {
        let mut t_min = f64::INFINITY;
        let mut t_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for (&t, &y) in self.t.iter().zip(self.y.iter()) {
            t_min = t_min.min(t);
            t_max = t_max.max(t);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        DatasetStats {
            n_points: self.t.len(),
            t_min,
            t_max,
            y_min,
            y_max,
        }
    }
}

/// Dataset summary used in reports and plots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_points: usize,
    pub t_min: f64,
    pub t_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Fit diagnostics derived from residuals and the smoothing matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    /// Mean squared residual on the training points.
    pub mse: f64,
    /// Effective degrees of freedom, `trace(S)`.
    pub edf: f64,
    /// Generalized cross-validation score, `mse / (1 - edf/n)^2`.
    pub gcv: f64,
    /// Number of observations.
    pub n: usize,
}

impl FitQuality {
    pub fn rmse(&self) -> f64 {
        self.mse.sqrt()
    }
}

/// Search box for the hyperparameter optimizer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchBounds {
    pub lambda_min: f64,
    pub lambda_max: f64,
    pub basis_min: usize,
    pub basis_max: usize,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            lambda_min: 0.0,
            lambda_max: 1.0,
            basis_min: 5,
            basis_max: 15,
        }
    }
}

impl SearchBounds {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.lambda_min.is_finite()
            && self.lambda_max.is_finite()
            && self.lambda_min >= 0.0
            && self.lambda_max >= self.lambda_min)
        {
            return Err(AppError::validation(format!(
                "Invalid lambda range: [{}, {}] (must be finite, >= 0, max >= min).",
                self.lambda_min, self.lambda_max
            )));
        }
        if self.basis_max < self.basis_min {
            return Err(AppError::validation(format!(
                "Invalid basis-count range: [{}, {}].",
                self.basis_min, self.basis_max
            )));
        }
        Ok(())
    }
}

/// Result of the hyperparameter search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Optimum {
    pub lambda: f64,
    pub basis_count: usize,
    pub quality: FitQuality,
}

/// A per-point fitted result (used for rankings and exports).
#[derive(Debug, Clone)]
pub struct PointResidual {
    pub t: f64,
    pub y_obs: f64,
    pub y_fit: f64,
    pub residual: f64,
}

/// A precomputed fitted grid for quick plotting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub t: Vec<f64>,
    pub y: Vec<f64>,
}

/// A saved model file (JSON).
///
/// The `model` payload is the facade's own opaque state; `quality` and `grid`
/// are convenience metadata for plotting without refitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    pub quality: Option<FitQuality>,
    pub grid: CurveGrid,
    pub model: SplineModel,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Input CSV with `t` and `y_observed` columns. When absent, a synthetic
    /// sample is generated instead.
    pub input: Option<PathBuf>,

    pub degree: usize,
    pub bounds: SearchBounds,

    /// Explicit regularization strength; skips the λ search when both this
    /// and `basis_count` are given.
    pub lambda: Option<f64>,
    /// Explicit basis count; skips the c search when both this and `lambda`
    /// are given.
    pub basis_count: Option<usize>,

    pub sample_count: usize,
    pub sample_seed: u64,
    pub noise_sigma: f64,
    pub t_min: f64,
    pub t_max: f64,

    pub top_n: usize,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_model: Option<PathBuf>,
}
