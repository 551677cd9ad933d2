//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `o`
//! - fitted curve: `-`
//! - a point and the curve in the same cell: `*`

use crate::domain::{CurveGrid, PointResidual};

/// Render observations and a fitted grid into a character plot.
pub fn render_ascii_plot(
    residuals: &[PointResidual],
    curve: &CurveGrid,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let points: Vec<(f64, f64)> = residuals.iter().map(|r| (r.t, r.y_obs)).collect();
    let curve_points: Vec<(f64, f64)> = curve
        .t
        .iter()
        .zip(curve.y.iter())
        .map(|(&t, &y)| (t, y))
        .collect();

    render_plot(&points, &curve_points, width, height)
}

/// Render a saved curve grid alone (no observation overlay).
pub fn render_ascii_plot_from_grid(curve: &CurveGrid, width: usize, height: usize) -> String {
    let curve_points: Vec<(f64, f64)> = curve
        .t
        .iter()
        .zip(curve.y.iter())
        .map(|(&t, &y)| (t, y))
        .collect();
    render_plot(&[], &curve_points, width.max(10), height.max(5))
}

fn render_plot(
    points: &[(f64, f64)],
    curve: &[(f64, f64)],
    width: usize,
    height: usize,
) -> String {
    let Some(((t_min, t_max), (y_min, y_max))) = plot_ranges(points, curve) else {
        return "(nothing to plot)\n".to_string();
    };

    let mut cells = vec![vec![' '; width]; height];

    // Curve first so observation markers win the cell.
    for &(t, y) in curve {
        if let Some((col, row)) = to_cell(t, y, t_min, t_max, y_min, y_max, width, height) {
            cells[row][col] = '-';
        }
    }
    for &(t, y) in points {
        if let Some((col, row)) = to_cell(t, y, t_min, t_max, y_min, y_max, width, height) {
            cells[row][col] = if cells[row][col] == '-' { '*' } else { 'o' };
        }
    }

    let mut out = String::new();
    for (row, line) in cells.iter().enumerate() {
        // Y-axis labels at the top, middle, and bottom rows.
        let label = if row == 0 {
            format!("{y_max:>9.3} ")
        } else if row == height - 1 {
            format!("{y_min:>9.3} ")
        } else if row == height / 2 {
            format!("{:>9.3} ", (y_min + y_max) / 2.0)
        } else {
            " ".repeat(10)
        };
        out.push_str(&label);
        out.push('|');
        out.extend(line.iter());
        out.push('\n');
    }

    out.push_str(&" ".repeat(10));
    out.push('+');
    out.push_str(&"-".repeat(width));
    out.push('\n');

    let left = format!("{t_min:.3}");
    let right = format!("{t_max:.3}");
    let gap = width.saturating_sub(left.len() + right.len());
    out.push_str(&" ".repeat(11));
    out.push_str(&left);
    out.push_str(&" ".repeat(gap));
    out.push_str(&right);
    out.push('\n');

    out
}

fn plot_ranges(
    points: &[(f64, f64)],
    curve: &[(f64, f64)],
) -> Option<((f64, f64), (f64, f64))> {
    let mut t_min = f64::INFINITY;
    let mut t_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for &(t, y) in points.iter().chain(curve.iter()) {
        if !(t.is_finite() && y.is_finite()) {
            continue;
        }
        t_min = t_min.min(t);
        t_max = t_max.max(t);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !(t_min.is_finite() && t_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        return None;
    }
    if (t_max - t_min).abs() < 1e-12 {
        t_max = t_min + 1.0;
    }
    if (y_max - y_min).abs() < 1e-12 {
        y_max = y_min + 1.0;
    }
    Some(((t_min, t_max), (y_min, y_max)))
}

#[allow(clippy::too_many_arguments)]
fn to_cell(
    t: f64,
    y: f64,
    t_min: f64,
    t_max: f64,
    y_min: f64,
    y_max: f64,
    width: usize,
    height: usize,
) -> Option<(usize, usize)> {
    if !(t.is_finite() && y.is_finite()) {
        return None;
    }
    let u = (t - t_min) / (t_max - t_min);
    let v = (y - y_min) / (y_max - y_min);
    if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
        return None;
    }
    let col = ((u * (width as f64 - 1.0)).round() as usize).min(width - 1);
    // Row 0 is the top of the plot.
    let row = height - 1 - ((v * (height as f64 - 1.0)).round() as usize).min(height - 1);
    Some((col, row))
}
