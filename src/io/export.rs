//! Export fit results to CSV.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{CurveGrid, PointResidual};
use crate::error::AppError;

/// Write per-point results (observed, fitted, residual) to a CSV file.
pub fn write_results_csv(path: &Path, residuals: &[PointResidual]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::io(format!(
            "Failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;

    writeln!(file, "t,y_observed,y_fit,residual")
        .map_err(|e| AppError::io(format!("Failed to write export CSV header: {e}")))?;

    for r in residuals {
        writeln!(
            file,
            "{:.10},{:.10},{:.10},{:.10}",
            r.t, r.y_obs, r.y_fit, r.residual
        )
        .map_err(|e| AppError::io(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write a fitted grid (prediction output) to a CSV file.
pub fn write_grid_csv(path: &Path, grid: &CurveGrid) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::io(format!(
            "Failed to create grid CSV '{}': {e}",
            path.display()
        ))
    })?;

    write_grid(&mut file, grid)
}

/// Write a fitted grid as CSV to any writer (used for stdout output too).
pub fn write_grid<W: Write>(writer: &mut W, grid: &CurveGrid) -> Result<(), AppError> {
    writeln!(writer, "t,y_fit")
        .map_err(|e| AppError::io(format!("Failed to write grid CSV header: {e}")))?;
    for (&t, &y) in grid.t.iter().zip(grid.y.iter()) {
        writeln!(writer, "{t:.10},{y:.10}")
            .map_err(|e| AppError::io(format!("Failed to write grid CSV row: {e}")))?;
    }
    Ok(())
}
