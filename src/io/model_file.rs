//! Read/write model JSON files.
//!
//! The model JSON is the "portable" representation of a fitted curve:
//! - the facade's full state (degree, λ, basis count, knots, coefficients)
//! - fit quality diagnostics
//! - a precomputed fitted grid for quick plotting
//!
//! The schema is defined by `domain::ModelFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{CurveGrid, DatasetStats, FitQuality, ModelFile};
use crate::error::AppError;
use crate::model::SplineModel;

/// Grid resolution stored alongside the model for plotting.
const GRID_POINTS: usize = 101;

/// Write a model JSON file, including a fitted grid over the data range.
pub fn write_model_json(
    path: &Path,
    model: &SplineModel,
    quality: Option<&FitQuality>,
    stats: &DatasetStats,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::io(format!(
            "Failed to create model JSON '{}': {e}",
            path.display()
        ))
    })?;

    let grid = build_grid(model, stats.t_min, stats.t_max, GRID_POINTS)?;
    let payload = ModelFile {
        tool: "psfit".to_string(),
        quality: quality.cloned(),
        grid,
        model: model.clone(),
    };

    serde_json::to_writer_pretty(file, &payload)
        .map_err(|e| AppError::io(format!("Failed to write model JSON: {e}")))?;

    Ok(())
}

/// Read a model JSON file.
pub fn read_model_json(path: &Path) -> Result<ModelFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::io(format!(
            "Failed to open model JSON '{}': {e}",
            path.display()
        ))
    })?;
    let payload: ModelFile = serde_json::from_reader(file)
        .map_err(|e| AppError::io(format!("Invalid model JSON: {e}")))?;
    Ok(payload)
}

/// Evaluate the fitted curve on an evenly spaced grid.
pub fn build_grid(
    model: &SplineModel,
    t_min: f64,
    t_max: f64,
    n: usize,
) -> Result<CurveGrid, AppError> {
    let n = n.max(2);
    let mut t0 = t_min;
    let mut t1 = t_max;
    if !(t0.is_finite() && t1.is_finite()) || t1 < t0 {
        t0 = 0.0;
        t1 = 1.0;
    }
    if (t1 - t0).abs() < 1e-9 {
        t0 -= 0.5;
        t1 += 0.5;
    }

    let mut t = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        t.push(t0 + u * (t1 - t0));
    }
    let y = model.predict(&t)?;

    Ok(CurveGrid { t, y })
}
