//! B-spline design matrix via the Cox–de Boor recursion.
//!
//! Column `j` of the design matrix is the `j`-th B-spline basis function of
//! the given degree over the knot vector, evaluated at each query point.
//! Inside the spline's valid domain the basis functions are non-negative,
//! compactly supported, and sum to 1 at every point (partition of unity).
//!
//! Numerical notes:
//! - zero-length knot spans (repeated knots) contribute a zero blend term,
//!   never a division by zero;
//! - the degree-0 indicator uses half-open spans except the one ending at
//!   the domain's right edge, which is closed so the partition of unity
//!   holds at `max(t)` itself.

use nalgebra::DMatrix;

/// A knot span narrower than this is treated as collapsed.
const ZERO_SPAN: f64 = 1e-12;

/// Evaluate the B-spline basis at each query point.
///
/// Returns an `(x.len(), knots.len() - degree - 1)` matrix. Query points
/// outside the extended knot support produce all-zero rows. Pure function of
/// `(x, knots, degree)`.
pub fn design_matrix(x: &[f64], knots: &[f64], degree: usize) -> DMatrix<f64> {
    debug_assert!(knots.len() > degree + 1, "knot vector too short for degree");
    let n_basis = knots.len() - degree - 1;
    let mut out = DMatrix::<f64>::zeros(x.len(), n_basis);

    // Index of the span whose right endpoint is the domain maximum.
    let last_span = knots.len() - degree - 2;

    for (i, &xv) in x.iter().enumerate() {
        // Degree 0: indicator of the containing knot span.
        let mut b = vec![0.0; knots.len() - 1];
        for j in 0..knots.len() - 1 {
            let hit = if j == last_span {
                xv >= knots[j] && xv <= knots[j + 1]
            } else {
                xv >= knots[j] && xv < knots[j + 1]
            };
            if hit {
                b[j] = 1.0;
                break;
            }
        }

        // Blend pairs of lower-degree neighbors up to the target degree.
        for k in 1..=degree {
            for j in 0..knots.len() - 1 - k {
                let d_left = knots[j + k] - knots[j];
                let left = if d_left > ZERO_SPAN {
                    (xv - knots[j]) / d_left * b[j]
                } else {
                    0.0
                };

                let d_right = knots[j + k + 1] - knots[j + 1];
                let right = if d_right > ZERO_SPAN {
                    (knots[j + k + 1] - xv) / d_right * b[j + 1]
                } else {
                    0.0
                };

                // In-place: index j is written after its old value is read,
                // and j+1 is still the lower-degree value at that point.
                b[j] = left + right;
            }
        }

        for j in 0..n_basis {
            out[(i, j)] = b[j];
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::knots::build_knots;

    #[test]
    fn column_count_matches_basis_count() {
        let t: Vec<f64> = (0..30).map(|i| i as f64 / 3.0).collect();
        let (c, d) = (8usize, 3usize);
        let knots = build_knots(&t, c, d).unwrap();
        let phi = design_matrix(&t, &knots, d);
        assert_eq!(phi.nrows(), t.len());
        assert_eq!(phi.ncols(), c);
    }

    #[test]
    fn partition_of_unity_inside_domain() {
        let t: Vec<f64> = (0..50).map(|i| i as f64 * 0.2).collect();
        for &(c, d) in &[(5usize, 3usize), (8, 3), (12, 2), (6, 1)] {
            let knots = build_knots(&t, c, d).unwrap();
            // Probe strictly inside [min(t), max(t)], endpoints included.
            let probes: Vec<f64> = (0..=40).map(|i| 9.8 * i as f64 / 40.0).collect();
            let phi = design_matrix(&probes, &knots, d);
            for i in 0..phi.nrows() {
                let sum: f64 = phi.row(i).iter().sum();
                assert!(
                    (sum - 1.0).abs() < 1e-9,
                    "row {i} sums to {sum} for c={c}, d={d}"
                );
            }
        }
    }

    #[test]
    fn basis_values_are_non_negative_and_finite() {
        let t: Vec<f64> = (0..25).map(|i| i as f64).collect();
        let knots = build_knots(&t, 9, 3).unwrap();
        let phi = design_matrix(&t, &knots, 3);
        for v in phi.iter() {
            assert!(v.is_finite());
            assert!(*v >= 0.0);
        }
    }

    #[test]
    fn repeated_knots_never_divide_by_zero() {
        // Clamped-style vector with collapsed boundary spans.
        let knots = [0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0];
        let x = [0.0, 0.25, 0.5, 0.75, 1.0];
        let phi = design_matrix(&x, &knots, 3);
        for v in phi.iter() {
            assert!(v.is_finite(), "NaN/inf in basis over repeated knots");
        }
        // Clamped basis still sums to 1 on the interior.
        for i in 0..x.len() {
            let sum: f64 = phi.row(i).iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "x={} sums to {sum}", x[i]);
        }
    }

    #[test]
    fn points_outside_support_get_zero_rows() {
        let t: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let knots = build_knots(&t, 6, 3).unwrap();
        let lo = knots[0] - 1.0;
        let hi = knots[knots.len() - 1] + 1.0;
        let phi = design_matrix(&[lo, hi], &knots, 3);
        for i in 0..2 {
            let sum: f64 = phi.row(i).iter().map(|v| v.abs()).sum();
            assert!(sum < 1e-12);
        }
    }
}
