//! Z-score outlier detection
//!
//! A value is an outlier when `|value - mean| / std_dev > k`, with mean and
//! population standard deviation taken over the column's finite values.
//! A constant column has no outliers at any `k`.

use statrs::statistics::Statistics;

use super::finite_values;
use crate::types::{Column, OutlierColumnReport, ProductionTable};

/// Column mean and population std-dev, or `None` when no Z-score is
/// defined (no finite values, or every finite value identical).
fn location_and_scale(values: &[f64]) -> Option<(f64, f64)> {
    let finite = finite_values(values);
    let first = *finite.first()?;
    if finite.iter().all(|v| *v == first) {
        return None;
    }

    let mean = finite.iter().mean();
    let std_dev = finite.iter().population_std_dev();
    (std_dev > 0.0 && std_dev.is_finite()).then_some((mean, std_dev))
}

/// Per-row Z-scores. NaN where the row or the column has no defined score.
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    match location_and_scale(values) {
        Some((mean, std_dev)) => values
            .iter()
            .map(|v| if v.is_finite() { (v - mean) / std_dev } else { f64::NAN })
            .collect(),
        None => vec![f64::NAN; values.len()],
    }
}

/// One flag per row: true when `|z| > threshold`.
pub fn flag_outliers(values: &[f64], threshold: f64) -> Vec<bool> {
    z_scores(values)
        .into_iter()
        .map(|z| z.abs() > threshold) // NaN compares false
        .collect()
}

/// Row indices flagged at `threshold`, ascending.
pub fn outlier_indices(values: &[f64], threshold: f64) -> Vec<usize> {
    flag_outliers(values, threshold)
        .into_iter()
        .enumerate()
        .filter_map(|(i, flagged)| flagged.then_some(i))
        .collect()
}

/// Outliers for each requested column of the table.
pub fn outlier_report(table: &ProductionTable, columns: &[Column], threshold: f64) -> Vec<OutlierColumnReport> {
    columns
        .iter()
        .map(|&column| OutlierColumnReport {
            column,
            threshold,
            rows: outlier_indices(&table.column(column), threshold),
        })
        .collect()
}
