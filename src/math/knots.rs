//! Extended knot-vector construction.
//!
//! Interior knots are placed at empirical quantiles of the abscissas so knot
//! density follows data density. The vector is then extended by `degree`
//! points on each side, spaced by the first/last interior gap, so every basis
//! function is well-defined on the full data range.
//!
//! For basis count `c` and degree `d` the extended vector has exactly
//! `c + d + 1` entries and is non-decreasing by construction.

use crate::error::AppError;

/// Build the extended knot vector for `basis_count` B-splines of `degree`
/// over the abscissas `t`.
pub fn build_knots(t: &[f64], basis_count: usize, degree: usize) -> Result<Vec<f64>, AppError> {
    if basis_count <= degree {
        return Err(AppError::validation(format!(
            "Basis count must exceed the spline degree (c={basis_count}, d={degree})."
        )));
    }
    if t.len() < 2 {
        return Err(AppError::validation(
            "At least 2 abscissas are required to place knots.",
        ));
    }
    if t.iter().any(|v| !v.is_finite()) {
        return Err(AppError::validation("Non-finite abscissa in knot input."));
    }

    let num_knots = basis_count + degree + 1;
    // c > d guarantees at least 2 interior positions.
    let interior_count = num_knots - 2 * degree;

    let mut sorted = t.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut interior = Vec::with_capacity(interior_count);
    for i in 0..interior_count {
        let q = i as f64 / (interior_count as f64 - 1.0);
        interior.push(quantile_sorted(&sorted, q));
    }

    // Extend by repeating the boundary spacing on each side. Degenerate data
    // (all abscissas equal) yields zero spacing and thus repeated knots; the
    // basis evaluation tolerates those spans.
    let spacing_start = interior[1] - interior[0];
    let spacing_end = interior[interior_count - 1] - interior[interior_count - 2];

    let mut knots = Vec::with_capacity(num_knots);
    for i in (1..=degree).rev() {
        knots.push(interior[0] - i as f64 * spacing_start);
    }
    knots.extend_from_slice(&interior);
    for i in 1..=degree {
        knots.push(interior[interior_count - 1] + i as f64 * spacing_end);
    }

    debug_assert_eq!(knots.len(), num_knots);
    Ok(knots)
}

/// Linear-interpolation quantile of a sorted slice, `q` in `[0, 1]`.
///
/// Matches the conventional definition: position `q * (n - 1)` interpolated
/// between the two neighboring order statistics.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    let pos = q.clamp(0.0, 1.0) * (n as f64 - 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}
