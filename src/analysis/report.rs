//! One-shot statistics report over a production table

use tracing::{debug, info};

use super::{aggregation, outliers, summary, CorrelationEngine};
use crate::types::{AnalysisReport, Column, ProductionTable};

/// Run every analysis over the table.
///
/// Outliers are reported for the measured columns only; the matrix and the
/// significance scan cover every numeric column.
pub fn analyze(table: &ProductionTable, outlier_sigma: f64) -> AnalysisReport {
    let summaries = summary::describe_table(table);
    let outliers = outliers::outlier_report(table, &Column::MEASURED, outlier_sigma);
    let correlation_matrix = CorrelationEngine::matrix(table, &Column::ALL);
    let (significant_correlations, best_p) =
        CorrelationEngine::analyze_production_correlations(table, &Column::ALL);
    let well_summaries = aggregation::well_summaries(table);
    let field_totals = aggregation::field_daily_totals(table);

    for o in outliers.iter().filter(|o| o.count() > 0) {
        debug!(column = %o.column, count = o.count(), threshold = o.threshold, "Outliers flagged");
    }
    info!(
        rows = table.len(),
        wells = well_summaries.len(),
        outliers = outliers.iter().map(|o| o.count()).sum::<usize>(),
        significant = significant_correlations.len(),
        best_p,
        "Analysis complete"
    );

    AnalysisReport {
        rows: table.len(),
        wells: well_summaries.len(),
        summaries,
        outliers,
        correlation_matrix,
        significant_correlations,
        well_summaries,
        field_totals,
    }
}
