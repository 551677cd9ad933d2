//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{DatasetStats, FitQuality, Optimum, PointResidual, SearchBounds};

/// Format the full run summary (dataset stats + search result + fit quality).
pub fn format_run_summary(
    stats: &DatasetStats,
    bounds: &SearchBounds,
    optimum: &Optimum,
    degree: usize,
) -> String {
    let mut out = String::new();

    out.push_str("=== psfit - penalized B-spline fit ===\n");
    out.push_str(&format!(
        "Points: n={} | t=[{:.3}, {:.3}] | y=[{:.3}, {:.3}]\n",
        stats.n_points, stats.t_min, stats.t_max, stats.y_min, stats.y_max
    ));
    out.push_str(&format!(
        "Search: λ ∈ [{:.4}, {:.4}] | c ∈ [{}, {}] | degree {}\n",
        bounds.lambda_min, bounds.lambda_max, bounds.basis_min, bounds.basis_max, degree
    ));

    out.push_str("\nOptimum:\n");
    out.push_str(&format!("- λ = {:.6}\n", optimum.lambda));
    out.push_str(&format!("- c = {}\n", optimum.basis_count));
    out.push_str(&format_quality(&optimum.quality));
    out.push('\n');

    out
}

/// Format fit diagnostics as bullet lines.
pub fn format_quality(quality: &FitQuality) -> String {
    format!(
        "- GCV = {:.6}\n- MSE = {:.6} (RMSE {:.6})\n- edf = {:.2} of n = {}\n",
        quality.gcv,
        quality.mse,
        quality.rmse(),
        quality.edf,
        quality.n
    )
}

/// Format the worst-fit table.
pub fn format_worst_table(worst: &[PointResidual]) -> String {
    let mut out = String::new();
    out.push_str("Worst-fit points (largest |residual|):\n");
    if worst.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }

    out.push_str(&format!(
        "  {:>10} {:>12} {:>12} {:>12}\n",
        "t", "y_obs", "y_fit", "residual"
    ));
    for r in worst {
        out.push_str(&format!(
            "  {:>10.4} {:>12.4} {:>12.4} {:>12.4}\n",
            r.t, r.y_obs, r.y_fit, r.residual
        ));
    }
    out
}
