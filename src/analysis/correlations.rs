//! Statistical Correlation Engine
//!
//! Calculates Pearson correlations with p-value filtering using the statrs crate.
//! Only correlations that meet the significance threshold (p < 0.05) are
//! reported as significant; the full matrix is available unfiltered.
//!
//! ## Key Features
//! - Pearson correlation over pairwise-finite observations (NaN rows dropped)
//! - P-value calculation using Student's t-distribution (statrs)
//! - Correlation matrix across any set of table columns
//! - Significant pairs sorted by |r|, strongest first

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::types::analysis_thresholds::{MIN_CORRELATION_SAMPLES, SIGNIFICANCE_THRESHOLD};
use crate::types::{Column, CorrelationMatrix, ProductionTable, SignificantCorrelation};

/// Correlation analysis engine with statistical significance testing
pub struct CorrelationEngine;

impl CorrelationEngine {
    /// Calculate Pearson correlation with statistical significance testing
    ///
    /// # Returns
    /// Some(SignificantCorrelation) if there are enough paired samples and
    /// p < 0.05, None otherwise
    pub fn calculate(
        x: &[f64],
        y: &[f64],
        x_name: &str,
        y_name: &str,
    ) -> Option<SignificantCorrelation> {
        if x.len() != y.len() {
            return None;
        }
        let (xs, ys) = Self::paired_finite(x, y);
        let n = xs.len();
        if n < MIN_CORRELATION_SAMPLES {
            return None;
        }

        let r = Self::pearson_finite(&xs, &ys);
        let p_value = Self::p_value_for_r(r, n);
        if p_value >= SIGNIFICANCE_THRESHOLD {
            return None;
        }

        Some(SignificantCorrelation {
            x_param: x_name.to_string(),
            y_param: y_name.to_string(),
            r_value: r,
            r_squared: r * r,
            p_value,
            sample_count: n,
        })
    }

    /// Pearson correlation coefficient over rows where both values are finite.
    ///
    /// NaN with fewer than two pairs; 0 when either side is constant.
    pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
        let (xs, ys) = Self::paired_finite(x, y);
        if xs.len() < 2 {
            return f64::NAN;
        }
        Self::pearson_finite(&xs, &ys)
    }

    /// r = Σ[(xi - x̄)(yi - ȳ)] / sqrt(Σ(xi - x̄)² × Σ(yi - ȳ)²)
    fn pearson_finite(x: &[f64], y: &[f64]) -> f64 {
        let n = x.len() as f64;
        let mean_x = x.iter().sum::<f64>() / n;
        let mean_y = y.iter().sum::<f64>() / n;

        let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
        for (a, b) in x.iter().zip(y) {
            let dx = a - mean_x;
            let dy = b - mean_y;
            sxy += dx * dy;
            sxx += dx * dx;
            syy += dy * dy;
        }

        let denominator = (sxx * syy).sqrt();
        if denominator == 0.0 {
            0.0
        } else {
            (sxy / denominator).clamp(-1.0, 1.0)
        }
    }

    fn paired_finite(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
        x.iter()
            .zip(y)
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .map(|(a, b)| (*a, *b))
            .unzip()
    }

    /// Two-tailed p-value for r via Student's t with n-2 degrees of freedom
    ///
    /// Formula: t = r × sqrt(n-2) / sqrt(1-r²)
    pub fn p_value_for_r(r: f64, n: usize) -> f64 {
        if n < 3 || !r.is_finite() {
            return 1.0;
        }

        // Perfect or near-perfect correlation is highly significant
        if r.abs() >= 0.9999 {
            return 0.0;
        }

        let df = (n - 2) as f64;
        let t_stat = r * df.sqrt() / (1.0 - r * r).sqrt();

        match StudentsT::new(0.0, 1.0, df) {
            Ok(t_dist) => 2.0 * (1.0 - t_dist.cdf(t_stat.abs())),
            Err(_) => 1.0,
        }
    }

    /// Pearson matrix over `columns` of the table.
    pub fn matrix(table: &ProductionTable, columns: &[Column]) -> CorrelationMatrix {
        let data: Vec<Vec<f64>> = columns.iter().map(|&c| table.column(c)).collect();
        let k = columns.len();
        let mut values = vec![f64::NAN; k * k];

        for i in 0..k {
            for j in i..k {
                let r = Self::pearson(&data[i], &data[j]);
                values[i * k + j] = r;
                values[j * k + i] = r;
            }
        }

        CorrelationMatrix {
            columns: columns.to_vec(),
            values,
        }
    }

    /// All significant pairs among `columns`.
    ///
    /// # Returns
    /// Tuple of (significant correlations, best p-value found). The best
    /// p-value is useful for reporting when nothing is significant.
    pub fn analyze_production_correlations(
        table: &ProductionTable,
        columns: &[Column],
    ) -> (Vec<SignificantCorrelation>, f64) {
        let data: Vec<Vec<f64>> = columns.iter().map(|&c| table.column(c)).collect();

        let mut correlations = Vec::new();
        let mut best_p: f64 = 1.0;

        for i in 0..columns.len() {
            for j in (i + 1)..columns.len() {
                let (x, y) = (&data[i], &data[j]);
                if let Some(c) = Self::calculate(x, y, columns[i].name(), columns[j].name()) {
                    best_p = best_p.min(c.p_value);
                    correlations.push(c);
                } else {
                    // Track the best p-value even for non-significant pairs
                    let (xs, _) = Self::paired_finite(x, y);
                    let p = Self::p_value_for_r(Self::pearson(x, y), xs.len());
                    best_p = best_p.min(p);
                }
            }
        }

        // Sort by absolute r-value (strongest correlations first)
        correlations.sort_by(|a, b| {
            b.r_value
                .abs()
                .partial_cmp(&a.r_value.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        (correlations, best_p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DailyMeasurements, ProductionRecord};
    use chrono::NaiveDate;

    fn table_from(rows: impl Iterator<Item = DailyMeasurements>) -> ProductionTable {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ProductionTable::new(
            rows.enumerate()
                .map(|(i, m)| {
                    ProductionRecord::new(start + chrono::Days::new(i as u64), "W-001", "F-1", m)
                })
                .collect(),
        )
    }

    #[test]
    fn test_perfect_positive_correlation() {
        let x: Vec<f64> = (0..100).map(f64::from).collect();
        let y = x.clone();

        let corr = CorrelationEngine::calculate(&x, &y, "X", "Y").unwrap();
        assert!((corr.r_value - 1.0).abs() < 0.001);
        assert!(corr.p_value < 0.05);
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let x: Vec<f64> = (0..100).map(f64::from).collect();
        let y: Vec<f64> = (0..100).map(|i| 100.0 - f64::from(i)).collect();

        let corr = CorrelationEngine::calculate(&x, &y, "X", "Y").unwrap();
        assert!((corr.r_value + 1.0).abs() < 0.001);
        assert!(corr.p_value < 0.05);
    }

    #[test]
    fn test_weak_correlation_rejected() {
        let x: Vec<f64> = (0..100).map(f64::from).collect();
        let y: Vec<f64> = (0..100).map(|i| if i % 2 == 0 { 50.0 } else { 51.0 }).collect();

        let r = CorrelationEngine::pearson(&x, &y);
        let p = CorrelationEngine::p_value_for_r(r, 100);
        assert!(r.abs() < 0.1, "Test data should produce weak correlation, got r={r}");
        assert!(p > 0.05, "Weak correlation should have p > 0.05, got p={p}");
        assert!(CorrelationEngine::calculate(&x, &y, "X", "Y").is_none());
    }

    #[test]
    fn test_insufficient_samples_rejected() {
        let x: Vec<f64> = (0..20).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| v * 2.0).collect();
        assert!(CorrelationEngine::calculate(&x, &y, "X", "Y").is_none());
    }

    #[test]
    fn test_nan_pairs_are_dropped() {
        let mut x: Vec<f64> = (0..40).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v + 1.0).collect();
        x[5] = f64::NAN;
        let corr = CorrelationEngine::calculate(&x, &y, "X", "Y").unwrap();
        assert_eq!(corr.sample_count, 39);
        assert!((corr.r_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_column_is_uncorrelated() {
        let x: Vec<f64> = (0..50).map(f64::from).collect();
        let y = vec![24.0; 50];
        assert_eq!(CorrelationEngine::pearson(&x, &y), 0.0);
        assert!(CorrelationEngine::pearson(&[1.0], &[2.0]).is_nan());
    }

    #[test]
    fn test_p_value_calculation_accuracy() {
        // r=0.5, n=30 gives p ≈ 0.005
        let p = CorrelationEngine::p_value_for_r(0.5, 30);
        assert!(p < 0.01 && p > 0.001, "r=0.5, n=30 should have p ≈ 0.005, got {p}");

        // r=0.2, n=30 gives p ≈ 0.29
        let p = CorrelationEngine::p_value_for_r(0.2, 30);
        assert!(p > 0.2, "r=0.2, n=30 should have p > 0.2, got {p}");
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let table = table_from((0..60).map(|i| {
            let oil = 1000.0 - f64::from(i) * 5.0;
            DailyMeasurements {
                oil_bbl: oil,
                gas_mscf: oil * 1.2,
                water_bbl: 100.0 + f64::from(i),
                operating_hours: 24.0,
                ..Default::default()
            }
        }));
        let cols = [Column::OilBbl, Column::GasMscf, Column::WaterBbl];
        let m = CorrelationEngine::matrix(&table, &cols);
        assert_eq!(m.size(), 3);
        for c in cols {
            assert!((m.get(c, c).unwrap() - 1.0).abs() < 1e-9);
        }
        assert_eq!(m.get(Column::OilBbl, Column::WaterBbl), m.get(Column::WaterBbl, Column::OilBbl));
        assert!((m.get(Column::OilBbl, Column::GasMscf).unwrap() - 1.0).abs() < 1e-9);
        assert!((m.get(Column::OilBbl, Column::WaterBbl).unwrap() + 1.0).abs() < 1e-9);
        assert!(m.get(Column::OilBbl, Column::ChokePercent).is_none());
    }

    #[test]
    fn test_significant_pairs_sorted_by_strength() {
        let table = table_from((0..100).map(|i| {
            let t = f64::from(i);
            DailyMeasurements {
                oil_bbl: 1000.0 - t * 3.0,
                gas_mscf: 1200.0 - t * 3.0 + if i % 2 == 0 { 40.0 } else { -40.0 },
                water_bbl: 100.0 + t,
                operating_hours: 24.0,
                ..Default::default()
            }
        }));
        let cols = [Column::OilBbl, Column::GasMscf, Column::WaterBbl];
        let (correlations, best_p) = CorrelationEngine::analyze_production_correlations(&table, &cols);

        assert!(!correlations.is_empty());
        assert!(best_p < 0.05);
        for pair in correlations.windows(2) {
            assert!(pair[0].r_value.abs() >= pair[1].r_value.abs(), "Correlations should be sorted by |r|");
        }
        let oil_water = correlations
            .iter()
            .find(|c| c.x_param == "oil_bbl" && c.y_param == "water_bbl")
            .expect("oil-water pair should be significant");
        assert!(oil_water.r_value < -0.99);
    }
}
