//! Production Statistics
//!
//! Stateless consumers of the production table. All of them skip NaN
//! (undefined ratio) values rather than propagating them.
//!
//! ## Architecture
//! - `outliers`: Z-score outlier flagging (population std-dev)
//! - `summary`: descriptive statistics per column
//! - `correlations`: Pearson correlation matrix and p-value filtering (statrs)
//! - `aggregation`: per-well roll-ups and per-field daily totals
//! - `report`: bundles all of the above for the CLI

pub mod outliers;
pub mod summary;
pub mod correlations;
pub mod aggregation;
pub mod report;

// Re-export public API
pub use outliers::{flag_outliers, outlier_indices, outlier_report, z_scores};
pub use summary::{describe, describe_table};
pub use correlations::CorrelationEngine;
pub use aggregation::{field_daily_totals, well_summaries};
pub use report::analyze;

/// The finite values of a column, in order.
pub(crate) fn finite_values(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}
