//! Per-well and per-field roll-ups

use std::collections::BTreeMap;

use chrono::NaiveDate;
use statrs::statistics::Statistics;

use super::finite_values;
use crate::types::{FieldDailyTotal, ProductionRecord, ProductionTable, WellSummary};

/// One summary per well, in table order.
pub fn well_summaries(table: &ProductionTable) -> Vec<WellSummary> {
    table
        .well_ids()
        .into_iter()
        .map(|well_id| summarize_well(well_id, table.for_well(well_id)))
        .collect()
}

fn summarize_well<'a>(well_id: &str, records: impl Iterator<Item = &'a ProductionRecord>) -> WellSummary {
    let rows: Vec<&ProductionRecord> = records.collect();

    let sum = |f: fn(&ProductionRecord) -> f64| rows.iter().map(|r| f(r)).sum::<f64>();
    let nan_mean = |f: fn(&ProductionRecord) -> f64| {
        let values: Vec<f64> = rows.iter().map(|r| f(r)).collect();
        finite_values(&values).iter().mean()
    };

    let peak = rows
        .iter()
        .max_by(|a, b| a.oil_bbl.total_cmp(&b.oil_bbl));

    WellSummary {
        well_id: well_id.to_string(),
        field_id: rows.first().map(|r| r.field_id.clone()).unwrap_or_default(),
        cumulative_oil_bbl: sum(|r| r.oil_bbl),
        cumulative_gas_mscf: sum(|r| r.gas_mscf),
        cumulative_water_bbl: sum(|r| r.water_bbl),
        cumulative_boe: sum(|r| r.boe_equivalent),
        mean_water_cut: nan_mean(|r| r.water_cut),
        mean_gas_oil_ratio: nan_mean(|r| r.gas_oil_ratio),
        peak_oil_bbl: peak.map_or(f64::NAN, |r| r.oil_bbl),
        peak_oil_date: peak.map(|r| r.date),
        producing_days: rows.iter().filter(|r| r.operating_hours > 0.0).count(),
        total_days: rows.len(),
    }
}

/// Daily oil/gas/water totals per field, ordered by field (table order)
/// then date.
pub fn field_daily_totals(table: &ProductionTable) -> Vec<FieldDailyTotal> {
    table
        .field_ids()
        .into_iter()
        .flat_map(|field_id| {
            let mut by_date: BTreeMap<NaiveDate, FieldDailyTotal> = BTreeMap::new();
            for r in table.iter().filter(|r| r.field_id == field_id) {
                let total = by_date.entry(r.date).or_insert_with(|| FieldDailyTotal {
                    field_id: field_id.to_string(),
                    date: r.date,
                    oil_bbl: 0.0,
                    gas_mscf: 0.0,
                    water_bbl: 0.0,
                    active_wells: 0,
                });
                total.oil_bbl += r.oil_bbl;
                total.gas_mscf += r.gas_mscf;
                total.water_bbl += r.water_bbl;
                if r.operating_hours > 0.0 {
                    total.active_wells += 1;
                }
            }
            by_date.into_values()
        })
        .collect()
}
