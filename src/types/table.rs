//! ProductionTable: the in-memory table handed to every consumer

use chrono::NaiveDate;
use serde::Serialize;

use super::{Column, ProductionRecord};

/// Ordered production records, well-major then by day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProductionTable {
    records: Vec<ProductionRecord>,
}

impl ProductionTable {
    pub fn new(records: Vec<ProductionRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ProductionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProductionRecord> {
        self.records.iter()
    }

    /// Extract one numeric column in row order.
    pub fn column(&self, column: Column) -> Vec<f64> {
        self.records.iter().map(|r| column.value(r)).collect()
    }

    /// Well identifiers in first-appearance order.
    pub fn well_ids(&self) -> Vec<&str> {
        unique_in_order(self.records.iter().map(|r| r.well_id.as_str()))
    }

    /// Field identifiers in first-appearance order.
    pub fn field_ids(&self) -> Vec<&str> {
        unique_in_order(self.records.iter().map(|r| r.field_id.as_str()))
    }

    pub fn for_well<'a>(&'a self, well_id: &'a str) -> impl Iterator<Item = &'a ProductionRecord> + 'a {
        self.records.iter().filter(move |r| r.well_id == well_id)
    }

    /// First and last date present, if any.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(|r| r.date).min()?;
        let last = self.records.iter().map(|r| r.date).max()?;
        Some((first, last))
    }

    pub fn into_records(self) -> Vec<ProductionRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a ProductionTable {
    type Item = &'a ProductionRecord;
    type IntoIter = std::slice::Iter<'a, ProductionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn unique_in_order<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}
