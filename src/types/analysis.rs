//! Analysis result types: column summaries, outliers, correlations, well roll-ups

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Column;

/// Statistical thresholds used by the analysis layer
pub mod analysis_thresholds {
    /// P-value threshold for statistical significance
    pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;
    /// Minimum paired samples for a meaningful correlation
    pub const MIN_CORRELATION_SAMPLES: usize = 30;
}

/// Descriptive statistics for one numeric column (NaN values skipped).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: String,
    /// Number of finite values
    pub count: usize,
    /// Number of NaN / non-finite values that were skipped
    pub missing: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std_dev: f64,
    pub min: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub max: f64,
}

/// Z-score outliers found in one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierColumnReport {
    pub column: Column,
    pub threshold: f64,
    /// Row indices into the table, ascending
    pub rows: Vec<usize>,
}

impl OutlierColumnReport {
    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

/// A correlation that passed the significance filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificantCorrelation {
    pub x_param: String,
    pub y_param: String,
    pub r_value: f64,
    pub r_squared: f64,
    pub p_value: f64,
    pub sample_count: usize,
}

/// Symmetric Pearson correlation matrix over a set of columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<Column>,
    /// Row-major, `columns.len()²` entries
    pub values: Vec<f64>,
}

impl CorrelationMatrix {
    pub fn get(&self, x: Column, y: Column) -> Option<f64> {
        let i = self.columns.iter().position(|c| *c == x)?;
        let j = self.columns.iter().position(|c| *c == y)?;
        self.values.get(i * self.columns.len() + j).copied()
    }

    pub fn size(&self) -> usize {
        self.columns.len()
    }
}

/// Per-well roll-up over the whole horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellSummary {
    pub well_id: String,
    pub field_id: String,
    pub cumulative_oil_bbl: f64,
    pub cumulative_gas_mscf: f64,
    pub cumulative_water_bbl: f64,
    pub cumulative_boe: f64,
    /// Mean of the daily water cut, NaN days skipped
    pub mean_water_cut: f64,
    /// Mean of the daily gas-oil ratio, NaN days skipped
    pub mean_gas_oil_ratio: f64,
    pub peak_oil_bbl: f64,
    pub peak_oil_date: Option<NaiveDate>,
    /// Days with operating hours > 0
    pub producing_days: usize,
    pub total_days: usize,
}

/// Field-level production totals for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDailyTotal {
    pub field_id: String,
    pub date: NaiveDate,
    pub oil_bbl: f64,
    pub gas_mscf: f64,
    pub water_bbl: f64,
    pub active_wells: usize,
}

/// Everything the `--report` output contains.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub rows: usize,
    pub wells: usize,
    pub summaries: Vec<ColumnSummary>,
    pub outliers: Vec<OutlierColumnReport>,
    pub correlation_matrix: CorrelationMatrix,
    pub significant_correlations: Vec<SignificantCorrelation>,
    pub well_summaries: Vec<WellSummary>,
    /// Per field per date, ordered by field then date
    pub field_totals: Vec<FieldDailyTotal>,
}
