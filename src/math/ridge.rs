//! Ridge-penalized least squares.
//!
//! We repeatedly solve problems of the form:
//!
//! ```text
//! minimize ||y - Φβ||² + λ||β||²
//! ```
//!
//! whose normal-equations solution is `β = (ΦᵀΦ + λI)⁻¹ Φᵀ y`.
//!
//! Implementation choices:
//! - The regularized Gram matrix is factorized with Cholesky rather than
//!   inverted blindly; a failed factorization reports a singularity instead
//!   of silently returning NaNs. This matters when `λ = 0` and the basis
//!   count approaches the sample count.
//! - The explicit inverse is still materialized from the factorization
//!   because the smoothing (hat) matrix `S = Φ(ΦᵀΦ + λI)⁻¹Φᵀ` is part of
//!   the fit output: its trace is the effective degrees of freedom used by
//!   the GCV score.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;

/// Output of a single penalized solve.
#[derive(Debug, Clone)]
pub struct RidgeFit {
    /// Basis coefficients, length = number of design columns.
    pub coefficients: DVector<f64>,
    /// Smoothing matrix mapping `y` to fitted values, shape `n × n`.
    pub smoother: DMatrix<f64>,
}

/// Solve the ridge problem for a design matrix and targets.
pub fn ridge_solve(
    phi: &DMatrix<f64>,
    y: &DVector<f64>,
    lambda: f64,
) -> Result<RidgeFit, AppError> {
    if phi.nrows() != y.len() {
        return Err(AppError::validation(format!(
            "Design matrix has {} rows but y has {} entries.",
            phi.nrows(),
            y.len()
        )));
    }
    if !(lambda.is_finite() && lambda >= 0.0) {
        return Err(AppError::validation(format!(
            "Regularization strength must be finite and >= 0 (got {lambda})."
        )));
    }

    let c = phi.ncols();
    let mut gram = phi.transpose() * phi;
    for j in 0..c {
        gram[(j, j)] += lambda;
    }

    let Some(chol) = gram.cholesky() else {
        return Err(AppError::singular(format!(
            "ΦᵀΦ + λI is not positive definite (λ={lambda}, c={c}, n={}); \
             the design is rank-deficient. Increase λ or reduce the basis count.",
            phi.nrows()
        )));
    };

    // A = (ΦᵀΦ + λI)⁻¹ Φᵀ maps y to coefficients; S = ΦA maps y to ŷ.
    let influence = chol.inverse() * phi.transpose();
    let coefficients = &influence * y;
    let smoother = phi * &influence;

    if coefficients.iter().any(|v| !v.is_finite()) {
        return Err(AppError::singular(
            "Penalized solve produced non-finite coefficients.",
        ));
    }

    Ok(RidgeFit {
        coefficients,
        smoother,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpenalized_identity_design_reproduces_targets() {
        let phi = DMatrix::<f64>::identity(4, 4);
        let y = DVector::from_row_slice(&[1.0, -2.0, 0.5, 3.0]);
        let fit = ridge_solve(&phi, &y, 0.0).unwrap();

        for i in 0..4 {
            assert!((fit.coefficients[i] - y[i]).abs() < 1e-12);
        }
        // Hat matrix of a saturated fit is the identity: trace = n.
        assert!((fit.smoother.trace() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn solves_overdetermined_line_fit() {
        // y = 2 + 3x on x = 0..4, design = [1, x].
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let phi = DMatrix::from_fn(5, 2, |i, j| if j == 0 { 1.0 } else { x[i] });
        let y = DVector::from_iterator(5, x.iter().map(|&v| 2.0 + 3.0 * v));
        let fit = ridge_solve(&phi, &y, 0.0).unwrap();

        assert!((fit.coefficients[0] - 2.0).abs() < 1e-10);
        assert!((fit.coefficients[1] - 3.0).abs() < 1e-10);
        // Two free parameters -> trace(S) = 2.
        assert!((fit.smoother.trace() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn rank_deficient_design_reports_singular() {
        // Second column is identically zero: Gram is singular at λ = 0.
        let phi = DMatrix::from_fn(4, 2, |i, j| if j == 0 { 1.0 + i as f64 } else { 0.0 });
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0, 4.0]);

        let err = ridge_solve(&phi, &y, 0.0).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Singular);

        // Any positive λ restores definiteness.
        assert!(ridge_solve(&phi, &y, 1e-6).is_ok());
    }

    #[test]
    fn penalty_shrinks_coefficients() {
        let phi = DMatrix::<f64>::identity(3, 3);
        let y = DVector::from_row_slice(&[2.0, 2.0, 2.0]);

        let loose = ridge_solve(&phi, &y, 0.0).unwrap();
        let tight = ridge_solve(&phi, &y, 10.0).unwrap();
        for i in 0..3 {
            assert!(tight.coefficients[i].abs() < loose.coefficients[i].abs());
        }
        assert!(tight.smoother.trace() < loose.smoother.trace());
    }

    #[test]
    fn rejects_mismatched_rows_and_negative_lambda() {
        let phi = DMatrix::<f64>::identity(3, 3);
        let y = DVector::from_row_slice(&[1.0, 2.0]);
        assert_eq!(
            ridge_solve(&phi, &y, 0.0).unwrap_err().kind(),
            crate::error::ErrorKind::Validation
        );

        let y3 = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(
            ridge_solve(&phi, &y3, -0.5).unwrap_err().kind(),
            crate::error::ErrorKind::Validation
        );
    }
}
