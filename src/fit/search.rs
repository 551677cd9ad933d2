//! Hyperparameter search over (λ, basis count).
//!
//! The basis count is an integer, so instead of relaxing it into a
//! continuous parameter (and rounding inside the objective) we search it
//! exhaustively: every integer `c` in the requested range is a candidate,
//! evaluated independently and in parallel. For each `c` the knot vector and
//! design matrix are built once, and a golden-section search over λ finds
//! the GCV minimizer inside the λ bracket.
//!
//! Why this shape?
//! - It is deterministic given the same inputs (no rounding at bound edges).
//! - Candidates are independent, so rayon can fan them out.
//! - Infeasible candidates (`c <= degree`, singular fits) score `+∞` — a
//!   documented scoring convention, not swallowed errors. If *every*
//!   candidate is infeasible the search fails outright.

use nalgebra::DVector;
use rayon::prelude::*;

use crate::domain::{FitQuality, Optimum, SearchBounds};
use crate::error::AppError;
use crate::fit::gcv::gcv_score;
use crate::math::{build_knots, design_matrix, ridge_solve};

/// Golden-section iterations; brackets the λ minimizer to ~1e-10 of the range.
const GOLDEN_ITERS: usize = 48;

#[derive(Debug, Clone)]
struct Candidate {
    basis_count: usize,
    lambda: f64,
    quality: FitQuality,
}

/// Find `(λ_opt, c_opt)` minimizing GCV within the given bounds.
///
/// The returned λ always lies inside `[lambda_min, lambda_max]` and the
/// returned basis count inside `[basis_min, basis_max]`. Ties are broken
/// toward the smaller basis count, so results do not depend on evaluation
/// order.
pub fn optimize(
    degree: usize,
    t: &[f64],
    y: &[f64],
    bounds: &SearchBounds,
) -> Result<Optimum, AppError> {
    if t.len() != y.len() {
        return Err(AppError::validation(format!(
            "Mismatched lengths: t has {} points, y has {}.",
            t.len(),
            y.len()
        )));
    }
    bounds.validate()?;

    let counts: Vec<usize> = (bounds.basis_min..=bounds.basis_max)
        .filter(|&c| c > degree)
        .collect();
    if counts.is_empty() {
        return Err(AppError::optimization(format!(
            "No feasible basis count in [{}, {}] for degree {degree} \
             (the basis count must exceed the degree).",
            bounds.basis_min, bounds.basis_max
        )));
    }

    // Candidate basis counts are independent; evaluate in parallel and keep
    // ascending order so the tie-break below is deterministic.
    let candidates: Vec<Candidate> = counts
        .par_iter()
        .filter_map(|&c| best_lambda_for(degree, c, t, y, bounds))
        .collect();

    let Some(first) = candidates.first() else {
        return Err(AppError::optimization(
            "Every (λ, basis count) candidate was infeasible: all fits were \
             singular. Widen the λ range or lower the basis counts.",
        ));
    };

    let mut best = first;
    for cand in &candidates[1..] {
        if cand.quality.gcv < best.quality.gcv {
            best = cand;
        }
    }

    if !best.quality.gcv.is_finite() {
        return Err(AppError::optimization(format!(
            "Search did not find a finite GCV score; best candidate was \
             λ={}, c={} with GCV=∞. The basis range likely allows \
             interpolation of all {} points.",
            best.lambda,
            best.basis_count,
            t.len()
        )));
    }

    Ok(Optimum {
        lambda: best.lambda,
        basis_count: best.basis_count,
        quality: best.quality.clone(),
    })
}

/// Golden-section search over λ for one fixed basis count.
///
/// Returns `None` when the candidate is infeasible at every probed λ
/// (each such probe scores `+∞` for bracketing purposes).
fn best_lambda_for(
    degree: usize,
    basis_count: usize,
    t: &[f64],
    y: &[f64],
    bounds: &SearchBounds,
) -> Option<Candidate> {
    let knots = build_knots(t, basis_count, degree).ok()?;
    let phi = design_matrix(t, &knots, degree);
    let yv = DVector::from_column_slice(y);

    let evaluate = |lambda: f64| -> Option<FitQuality> {
        let fit = ridge_solve(&phi, &yv, lambda).ok()?;
        let y_hat = &phi * &fit.coefficients;
        Some(gcv_score(y, y_hat.as_slice(), &fit.smoother))
    };

    let mut best: Option<(f64, FitQuality)> = None;
    let mut probe = |lambda: f64| -> f64 {
        match evaluate(lambda) {
            Some(q) => {
                let better = match &best {
                    Some((_, b)) => q.gcv < b.gcv,
                    None => true,
                };
                if better {
                    best = Some((lambda, q.clone()));
                }
                q.gcv
            }
            None => f64::INFINITY,
        }
    };

    let (lo, hi) = (bounds.lambda_min, bounds.lambda_max);
    probe(lo);
    if hi > lo {
        probe(hi);

        // Golden-section in linear scale: the default bracket starts at 0,
        // which rules out the log-scale variant.
        let resphi = 2.0 - (1.0 + 5.0_f64.sqrt()) / 2.0;
        let mut a = lo;
        let mut b = hi;
        let mut c = a + resphi * (b - a);
        let mut d = b - resphi * (b - a);
        let mut fc = probe(c);
        let mut fd = probe(d);

        for _ in 0..GOLDEN_ITERS {
            if fc < fd {
                b = d;
                d = c;
                fd = fc;
                c = a + resphi * (b - a);
                fc = probe(c);
            } else {
                a = c;
                c = d;
                fc = fd;
                d = b - resphi * (b - a);
                fd = probe(d);
            }
        }
        probe((a + b) / 2.0);
    }

    best.map(|(lambda, quality)| Candidate {
        basis_count,
        lambda: lambda.clamp(lo, hi),
        quality,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand::rngs::StdRng;
    use rand_distr::Normal;

    fn noisy_sine(n: usize, sigma: f64, seed: u64) -> (Vec<f64>, Vec<f64>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0, sigma).unwrap();
        let t: Vec<f64> = (0..n).map(|i| 10.0 * i as f64 / (n as f64 - 1.0)).collect();
        let y: Vec<f64> = t.iter().map(|&v| v.sin() + normal.sample(&mut rng)).collect();
        (t, y)
    }

    #[test]
    fn optimum_respects_bounds() {
        let (t, y) = noisy_sine(50, 0.1, 7);
        let bounds = SearchBounds::default();
        let opt = optimize(3, &t, &y, &bounds).unwrap();

        assert!(opt.lambda >= bounds.lambda_min && opt.lambda <= bounds.lambda_max);
        assert!(opt.basis_count >= bounds.basis_min && opt.basis_count <= bounds.basis_max);
        assert!(opt.quality.gcv.is_finite());
    }

    #[test]
    fn skips_basis_counts_at_or_below_degree() {
        let (t, y) = noisy_sine(30, 0.1, 11);
        let bounds = SearchBounds {
            basis_min: 2,
            basis_max: 8,
            ..SearchBounds::default()
        };
        let opt = optimize(3, &t, &y, &bounds).unwrap();
        assert!(opt.basis_count > 3);
    }

    #[test]
    fn fails_when_no_basis_count_is_feasible() {
        let (t, y) = noisy_sine(20, 0.1, 3);
        let bounds = SearchBounds {
            basis_min: 1,
            basis_max: 3,
            ..SearchBounds::default()
        };
        let err = optimize(3, &t, &y, &bounds).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Optimization);
    }

    #[test]
    fn rejects_mismatched_inputs_and_bad_bounds() {
        let err = optimize(3, &[0.0, 1.0], &[0.0], &SearchBounds::default()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);

        let (t, y) = noisy_sine(20, 0.1, 5);
        let bounds = SearchBounds {
            lambda_min: -1.0,
            ..SearchBounds::default()
        };
        let err = optimize(3, &t, &y, &bounds).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
    }

    #[test]
    fn fixed_lambda_range_collapses_to_a_point() {
        let (t, y) = noisy_sine(40, 0.1, 9);
        let bounds = SearchBounds {
            lambda_min: 0.25,
            lambda_max: 0.25,
            ..SearchBounds::default()
        };
        let opt = optimize(3, &t, &y, &bounds).unwrap();
        assert!((opt.lambda - 0.25).abs() < 1e-12);
    }

    #[test]
    fn prefers_smoothing_on_noisy_data_over_interpolation() {
        // With enough noise the GCV minimizer should not sit at the most
        // flexible corner (largest c, λ = 0).
        let (t, y) = noisy_sine(40, 0.3, 42);
        let bounds = SearchBounds {
            lambda_min: 0.0,
            lambda_max: 10.0,
            basis_min: 5,
            basis_max: 20,
        };
        let opt = optimize(3, &t, &y, &bounds).unwrap();
        assert!(opt.quality.edf < 40.0 - 1.0);
    }
}
