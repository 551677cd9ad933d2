//! Reporting utilities: residuals and worst-fit rankings.

pub mod format;

pub use format::*;

use crate::domain::{Dataset, PointResidual};
use crate::error::AppError;
use crate::model::SplineModel;

/// Compute fitted values and residuals for each observation.
pub fn compute_residuals(
    dataset: &Dataset,
    model: &SplineModel,
) -> Result<Vec<PointResidual>, AppError> {
    let y_fit = model.predict(&dataset.t)?;

    let mut out = Vec::with_capacity(dataset.len());
    for ((&t, &y_obs), &fit) in dataset.t.iter().zip(dataset.y.iter()).zip(y_fit.iter()) {
        if !fit.is_finite() {
            return Err(AppError::validation(
                "Non-finite model prediction during residual computation.",
            ));
        }
        out.push(PointResidual {
            t,
            y_obs,
            y_fit: fit,
            residual: y_obs - fit,
        });
    }
    Ok(out)
}

/// Rank the top-N points the curve fits worst (largest |residual| first).
pub fn rank_worst(residuals: &[PointResidual], top_n: usize) -> Vec<PointResidual> {
    let mut sorted = residuals.to_vec();
    sorted.sort_by(|a, b| {
        b.residual
            .abs()
            .partial_cmp(&a.residual.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(top_n);
    sorted
}
