//! Penalized B-spline regression model.
//!
//! `SplineModel` owns the single mutable fitted-state slot: the degree is
//! fixed at construction, and each successful `fit` replaces the state
//! (knots, coefficients, smoothing matrix) wholesale. Everything else in the
//! crate is stateless, so callers that need concurrent access serialize
//! around this one object.

use std::io::{Read, Write};

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::domain::{FitQuality, Optimum, SearchBounds};
use crate::error::AppError;
use crate::fit::{gcv_score, search};
use crate::math::{build_knots, design_matrix, ridge_solve};

/// Everything produced by one `fit` call.
///
/// The smoothing matrix is retained (and persisted) so GCV can be evaluated
/// on a reloaded model without refitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelState {
    pub basis_count: usize,
    pub lambda: f64,
    pub knots: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub smoother: DMatrix<f64>,
}

/// Smooth-curve regression on a B-spline basis with a ridge penalty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplineModel {
    degree: usize,
    state: Option<ModelState>,
}

impl SplineModel {
    /// Create an unfitted model with a fixed spline degree.
    pub fn new(degree: usize) -> Self {
        Self {
            degree,
            state: None,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&ModelState> {
        self.state.as_ref()
    }

    fn fitted_state(&self) -> Result<&ModelState, AppError> {
        self.state
            .as_ref()
            .ok_or_else(|| AppError::not_fitted("Model has not been fitted yet."))
    }

    /// Fit the model, replacing any previous state.
    ///
    /// Fails (leaving the previous state intact) if the inputs are invalid,
    /// the basis count does not exceed the degree, or the penalized system
    /// is singular.
    pub fn fit(
        &mut self,
        t: &[f64],
        y: &[f64],
        lambda: f64,
        basis_count: usize,
    ) -> Result<(), AppError> {
        if t.len() != y.len() {
            return Err(AppError::validation(format!(
                "Mismatched lengths: t has {} points, y has {}.",
                t.len(),
                y.len()
            )));
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(AppError::validation("Non-finite observation in fit input."));
        }

        let knots = build_knots(t, basis_count, self.degree)?;
        let phi = design_matrix(t, &knots, self.degree);
        let yv = DVector::from_column_slice(y);
        let fit = ridge_solve(&phi, &yv, lambda)?;

        self.state = Some(ModelState {
            basis_count,
            lambda,
            knots,
            coefficients: fit.coefficients.as_slice().to_vec(),
            smoother: fit.smoother,
        });
        Ok(())
    }

    /// Evaluate the fitted curve at the query points.
    ///
    /// Points outside the extended knot support evaluate to 0 (no basis
    /// function covers them).
    pub fn predict(&self, x: &[f64]) -> Result<Vec<f64>, AppError> {
        let state = self.fitted_state()?;
        if x.iter().any(|v| !v.is_finite()) {
            return Err(AppError::validation("Non-finite query point in predict."));
        }

        let phi = design_matrix(x, &state.knots, self.degree);
        let coeffs = DVector::from_column_slice(&state.coefficients);
        Ok((&phi * &coeffs).as_slice().to_vec())
    }

    /// GCV score of the fitted state against a dataset.
    ///
    /// The dataset must have the same size as the one the model was fitted
    /// on: the stored smoothing matrix is `n × n` for the training `n`.
    pub fn gcv(&self, t: &[f64], y: &[f64]) -> Result<FitQuality, AppError> {
        let state = self.fitted_state()?;
        if t.len() != y.len() {
            return Err(AppError::validation(format!(
                "Mismatched lengths: t has {} points, y has {}.",
                t.len(),
                y.len()
            )));
        }
        if y.len() != state.smoother.nrows() {
            return Err(AppError::validation(format!(
                "GCV needs the training-sized dataset: smoother is {}×{} but \
                 {} points were supplied.",
                state.smoother.nrows(),
                state.smoother.ncols(),
                y.len()
            )));
        }

        let y_hat = self.predict(t)?;
        Ok(gcv_score(y, &y_hat, &state.smoother))
    }

    /// Search for the GCV-minimizing `(λ, basis count)`.
    ///
    /// Does not mutate the model; refitting with the returned optimum is the
    /// caller's explicit follow-up.
    pub fn optimize_parameters(
        &self,
        t: &[f64],
        y: &[f64],
        bounds: &SearchBounds,
    ) -> Result<Optimum, AppError> {
        search::optimize(self.degree, t, y, bounds)
    }

    /// Serialize the full model (degree + fitted state) to bytes.
    ///
    /// JSON with shortest-round-trip float formatting: reals survive the
    /// round trip bit-for-bit.
    pub fn to_bytes(&self) -> Result<Vec<u8>, AppError> {
        serde_json::to_vec(self).map_err(|e| AppError::io(format!("Failed to serialize model: {e}")))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(bytes)
            .map_err(|e| AppError::io(format!("Failed to deserialize model: {e}")))
    }

    pub fn save<W: Write>(&self, writer: W) -> Result<(), AppError> {
        serde_json::to_writer(writer, self)
            .map_err(|e| AppError::io(format!("Failed to write model: {e}")))
    }

    pub fn load<R: Read>(reader: R) -> Result<Self, AppError> {
        serde_json::from_reader(reader)
            .map_err(|e| AppError::io(format!("Failed to read model: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn sine_dataset(n: usize) -> (Vec<f64>, Vec<f64>) {
        let t: Vec<f64> = (0..n).map(|i| 10.0 * i as f64 / (n as f64 - 1.0)).collect();
        let y: Vec<f64> = t.iter().map(|&v| v.sin()).collect();
        (t, y)
    }

    #[test]
    fn predict_before_fit_is_a_not_fitted_error() {
        let model = SplineModel::new(3);
        let err = model.predict(&[0.0, 1.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFitted);

        let err = model.gcv(&[0.0, 1.0], &[0.0, 1.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFitted);
    }

    #[test]
    fn fit_then_predict_returns_finite_vector_of_matching_length() {
        let (t, y) = sine_dataset(30);
        let mut model = SplineModel::new(3);
        model.fit(&t, &y, 0.1, 8).unwrap();

        let y_hat = model.predict(&t).unwrap();
        assert_eq!(y_hat.len(), t.len());
        assert!(y_hat.iter().all(|v| v.is_finite()));

        let state = model.state().unwrap();
        assert_eq!(state.knots.len(), 8 + 3 + 1);
        assert_eq!(state.coefficients.len(), 8);
    }

    #[test]
    fn basis_count_must_exceed_degree() {
        let (t, y) = sine_dataset(20);
        let mut model = SplineModel::new(3);
        let err = model.fit(&t, &y, 0.0, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!model.is_fitted());
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let mut model = SplineModel::new(3);
        let err = model.fit(&[0.0, 1.0, 2.0], &[0.0, 1.0], 0.0, 6).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn interpolation_regime_passes_through_the_data() {
        // λ = 0 with as many basis functions as points: residuals vanish up
        // to numerical tolerance.
        let n = 8;
        let t: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let y: Vec<f64> = t.iter().map(|&v| (0.7 * v).sin() + 0.1 * v).collect();

        let mut model = SplineModel::new(3);
        model.fit(&t, &y, 0.0, n).unwrap();

        let y_hat = model.predict(&t).unwrap();
        for (i, (&obs, &fit)) in y.iter().zip(y_hat.iter()).enumerate() {
            assert!(
                (obs - fit).abs() < 1e-6,
                "residual at point {i}: {}",
                obs - fit
            );
        }
    }

    #[test]
    fn fits_the_reference_sine_scenario() {
        let t: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y = [0.0, 0.84, 0.91, 0.14, -0.76, -0.96, -0.28, 0.66, 0.99, 0.41];

        let mut model = SplineModel::new(3);
        model.fit(&t, &y, 0.0, 6).unwrap();

        let ends = model.predict(&[0.0, 9.0]).unwrap();
        assert!((ends[0] - y[0]).abs() < 0.2, "y(0) = {}", ends[0]);
        assert!((ends[1] - y[9]).abs() < 0.2, "y(9) = {}", ends[1]);
    }

    #[test]
    fn gcv_is_non_decreasing_for_large_lambda() {
        // Over-smoothing keeps worsening the training fit while the effective
        // degrees of freedom flatten toward zero, so the score cannot recover.
        use rand::prelude::*;
        use rand::rngs::StdRng;
        use rand_distr::Normal;

        let mut rng = StdRng::seed_from_u64(1234);
        let normal = Normal::new(0.0, 0.1).unwrap();
        let t: Vec<f64> = (0..50).map(|i| 10.0 * i as f64 / 49.0).collect();
        let y: Vec<f64> = t.iter().map(|&v| v.sin() + normal.sample(&mut rng)).collect();

        let mut previous = f64::NEG_INFINITY;
        for &lambda in &[1.0, 10.0, 100.0, 1000.0, 10000.0] {
            let mut model = SplineModel::new(3);
            model.fit(&t, &y, lambda, 10).unwrap();
            let q = model.gcv(&t, &y).unwrap();
            assert!(
                q.gcv >= previous - 1e-9,
                "GCV fell from {previous} to {} at λ={lambda}",
                q.gcv
            );
            previous = q.gcv;
        }
    }

    #[test]
    fn byte_round_trip_reproduces_predictions_exactly() {
        let (t, y) = sine_dataset(25);
        let mut model = SplineModel::new(3);
        model.fit(&t, &y, 0.05, 9).unwrap();

        let bytes = model.to_bytes().unwrap();
        let reloaded = SplineModel::from_bytes(&bytes).unwrap();

        assert_eq!(reloaded.degree(), model.degree());
        let a = model.state().unwrap();
        let b = reloaded.state().unwrap();
        assert_eq!(a.basis_count, b.basis_count);
        assert_eq!(a.lambda.to_bits(), b.lambda.to_bits());
        assert_eq!(a.knots.len(), b.knots.len());
        for (x, z) in a.knots.iter().zip(b.knots.iter()) {
            assert_eq!(x.to_bits(), z.to_bits());
        }
        for (x, z) in a.coefficients.iter().zip(b.coefficients.iter()) {
            assert_eq!(x.to_bits(), z.to_bits());
        }

        let probe = [0.5, 2.5, 7.75, 9.9];
        let before = model.predict(&probe).unwrap();
        let after = reloaded.predict(&probe).unwrap();
        for (x, z) in before.iter().zip(after.iter()) {
            assert_eq!(x.to_bits(), z.to_bits());
        }
    }

    #[test]
    fn refit_replaces_state_wholesale() {
        let (t, y) = sine_dataset(30);
        let mut model = SplineModel::new(3);
        model.fit(&t, &y, 0.1, 6).unwrap();
        model.fit(&t, &y, 0.2, 9).unwrap();

        let state = model.state().unwrap();
        assert_eq!(state.basis_count, 9);
        assert_eq!(state.knots.len(), 9 + 3 + 1);
        assert!((state.lambda - 0.2).abs() < 1e-15);
    }

    #[test]
    fn optimize_parameters_leaves_the_model_untouched() {
        let (t, y) = sine_dataset(40);
        let model = SplineModel::new(3);
        let opt = model
            .optimize_parameters(&t, &y, &SearchBounds::default())
            .unwrap();
        assert!(!model.is_fitted());
        assert!(opt.basis_count >= 5 && opt.basis_count <= 15);
    }
}
