//! Generalized cross-validation scoring.
//!
//! ```text
//! GCV = mse / (1 - edf/n)²     edf = trace(S)
//! ```
//!
//! The score estimates out-of-sample error without held-out data: the
//! effective degrees of freedom discount the training error by how much of
//! `y` the smoother can reproduce by construction. As `edf → n` (a fit with
//! enough freedom to interpolate) the score diverges to `+∞` — deliberately
//! unclamped, so over-parameterized candidates lose the hyperparameter
//! search on their own.

use nalgebra::DMatrix;

use crate::domain::FitQuality;

/// Denominators below this are treated as a fully saturated fit.
const MIN_DENOM: f64 = 1e-12;

/// Score a fit from observations, fitted values, and the smoothing matrix.
///
/// `y` and `y_hat` must have the same length as the smoother's dimension.
pub fn gcv_score(y: &[f64], y_hat: &[f64], smoother: &DMatrix<f64>) -> FitQuality {
    debug_assert_eq!(y.len(), y_hat.len());
    debug_assert_eq!(y.len(), smoother.nrows());

    let n = y.len();
    let mse = y
        .iter()
        .zip(y_hat.iter())
        .map(|(&obs, &fit)| {
            let r = obs - fit;
            r * r
        })
        .sum::<f64>()
        / n as f64;

    let edf = smoother.trace();
    let denom = 1.0 - edf / n as f64;

    // edf >= n means the smoother can reproduce y exactly; the score is
    // +∞ by convention (never NaN, even when mse is also zero).
    let gcv = if denom <= MIN_DENOM {
        f64::INFINITY
    } else {
        mse / (denom * denom)
    };

    FitQuality { mse, edf, gcv, n }
}
