//! CSV ingest and validation.
//!
//! The expected schema is the one produced by `psfit sample` (and by the
//! upstream simulators): a header row containing a `t` column and a
//! `y_observed` column (`y` is accepted as an alias). Extra columns are
//! ignored. Parsing failures report the offending line number.

use std::fs;
use std::path::Path;

use crate::domain::{Dataset, DatasetStats};
use crate::error::AppError;

/// A parsed and validated input file.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub dataset: Dataset,
    pub stats: DatasetStats,
}

/// Read and validate a dataset CSV from disk.
pub fn read_dataset_csv(path: &Path) -> Result<IngestedData, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read CSV '{}': {e}", path.display())))?;
    parse_dataset_csv(&text)
}

/// Parse a dataset CSV from an in-memory string.
pub fn parse_dataset_csv(text: &str) -> Result<IngestedData, AppError> {
    let mut lines = text.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or_else(|| AppError::validation("CSV is empty."))?;
    let columns: Vec<&str> = header.split(',').map(|c| c.trim()).collect();

    let t_col = find_column(&columns, &["t"]).ok_or_else(|| {
        AppError::validation("CSV must have a 't' column in its header row.")
    })?;
    let y_col = find_column(&columns, &["y_observed", "y"]).ok_or_else(|| {
        AppError::validation("CSV must have a 'y_observed' (or 'y') column in its header row.")
    })?;

    let mut t = Vec::new();
    let mut y = Vec::new();
    for (idx, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();
        let line_no = idx + 1;

        t.push(parse_field(&fields, t_col, "t", line_no)?);
        y.push(parse_field(&fields, y_col, "y_observed", line_no)?);
    }

    let dataset = Dataset::new(t, y)?;
    let stats = dataset.stats();
    Ok(IngestedData { dataset, stats })
}

fn find_column(columns: &[&str], names: &[&str]) -> Option<usize> {
    for name in names {
        if let Some(i) = columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
        {
            return Some(i);
        }
    }
    None
}

fn parse_field(fields: &[&str], col: usize, name: &str, line_no: usize) -> Result<f64, AppError> {
    let raw = fields.get(col).copied().ok_or_else(|| {
        AppError::validation(format!("Line {line_no}: missing '{name}' field."))
    })?;
    let value: f64 = raw.parse().map_err(|_| {
        AppError::validation(format!("Line {line_no}: invalid '{name}' value '{raw}'."))
    })?;
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "Line {line_no}: non-finite '{name}' value."
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_csv() {
        let text = "t,y_observed\n0.0,1.0\n1.0,0.5\n2.0,-0.25\n";
        let ingested = parse_dataset_csv(text).unwrap();
        assert_eq!(ingested.dataset.len(), 3);
        assert_eq!(ingested.stats.n_points, 3);
        assert!((ingested.stats.t_max - 2.0).abs() < 1e-12);
        assert!((ingested.stats.y_min + 0.25).abs() < 1e-12);
    }

    #[test]
    fn accepts_y_alias_extra_columns_and_blank_lines() {
        let text = "id,t,y\na,0,1\n\nb,1,2\n";
        let ingested = parse_dataset_csv(text).unwrap();
        assert_eq!(ingested.dataset.t, vec![0.0, 1.0]);
        assert_eq!(ingested.dataset.y, vec![1.0, 2.0]);
    }

    #[test]
    fn reports_missing_columns() {
        let err = parse_dataset_csv("time,value\n0,1\n").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
    }

    #[test]
    fn reports_bad_values_with_line_numbers() {
        let err = parse_dataset_csv("t,y_observed\n0.0,1.0\noops,2.0\n").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
        assert!(err.to_string().contains("Line 3"), "{err}");
    }

    #[test]
    fn rejects_too_few_rows() {
        let err = parse_dataset_csv("t,y_observed\n0.0,1.0\n").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
    }
}
