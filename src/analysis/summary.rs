//! Descriptive statistics per column

use statrs::statistics::{Data, Distribution, Max, Min, OrderStatistics};

use super::finite_values;
use crate::types::{Column, ColumnSummary, ProductionTable};

/// count / mean / std / min / quartiles / max over the finite values.
///
/// Standard deviation is the sample (n - 1) estimate; NaN when fewer
/// than two values are present.
pub fn describe(name: &str, values: &[f64]) -> ColumnSummary {
    let finite = finite_values(values);
    let count = finite.len();
    let missing = values.len() - count;

    if count == 0 {
        return ColumnSummary {
            column: name.to_string(),
            count,
            missing,
            mean: f64::NAN,
            std_dev: f64::NAN,
            min: f64::NAN,
            lower_quartile: f64::NAN,
            median: f64::NAN,
            upper_quartile: f64::NAN,
            max: f64::NAN,
        };
    }

    let mut data = Data::new(finite);
    let mean = data.mean().unwrap_or(f64::NAN);
    let std_dev = if count > 1 {
        data.std_dev().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    };

    ColumnSummary {
        column: name.to_string(),
        count,
        missing,
        mean,
        std_dev,
        min: data.min(),
        lower_quartile: data.lower_quartile(),
        median: data.quantile(0.5),
        upper_quartile: data.upper_quartile(),
        max: data.max(),
    }
}

/// Summaries for every numeric column, in `Column::ALL` order.
pub fn describe_table(table: &ProductionTable) -> Vec<ColumnSummary> {
    Column::ALL
        .iter()
        .map(|&c| describe(c.name(), &table.column(c)))
        .collect()
}
