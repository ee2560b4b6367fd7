//! Production table rows: ProductionRecord, DailyMeasurements, Column

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Barrels of oil equivalent per mscf of gas (6 mscf ≈ 1 boe).
pub const MSCF_PER_BOE: f64 = 6.0;

/// Raw measured values for one well on one day, before derived columns.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DailyMeasurements {
    pub oil_bbl: f64,
    pub gas_mscf: f64,
    pub water_bbl: f64,
    pub tubing_head_pressure_psi: f64,
    pub line_pressure_psi: f64,
    pub temperature_c: f64,
    pub choke_percent: f64,
    pub operating_hours: f64,
}

/// One row of the production table: a single well on a single day.
///
/// Field order is the column order of CSV output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub date: NaiveDate,
    pub well_id: String,
    pub field_id: String,
    pub oil_bbl: f64,
    pub gas_mscf: f64,
    pub water_bbl: f64,
    pub tubing_head_pressure_psi: f64,
    pub line_pressure_psi: f64,
    pub temperature_c: f64,
    pub choke_percent: f64,
    pub operating_hours: f64,
    /// oil + water
    pub total_liquid: f64,
    /// water / total_liquid, NaN when there is no liquid
    pub water_cut: f64,
    /// gas / oil, NaN when there is no oil
    pub gas_oil_ratio: f64,
    /// oil + gas / 6
    pub boe_equivalent: f64,
}

impl ProductionRecord {
    /// Build a record and compute its derived columns.
    pub fn new(
        date: NaiveDate,
        well_id: impl Into<String>,
        field_id: impl Into<String>,
        m: DailyMeasurements,
    ) -> Self {
        let total_liquid = m.oil_bbl + m.water_bbl;
        Self {
            date,
            well_id: well_id.into(),
            field_id: field_id.into(),
            oil_bbl: m.oil_bbl,
            gas_mscf: m.gas_mscf,
            water_bbl: m.water_bbl,
            tubing_head_pressure_psi: m.tubing_head_pressure_psi,
            line_pressure_psi: m.line_pressure_psi,
            temperature_c: m.temperature_c,
            choke_percent: m.choke_percent,
            operating_hours: m.operating_hours,
            total_liquid,
            water_cut: ratio_or_nan(m.water_bbl, total_liquid),
            gas_oil_ratio: ratio_or_nan(m.gas_mscf, m.oil_bbl),
            boe_equivalent: m.oil_bbl + m.gas_mscf / MSCF_PER_BOE,
        }
    }

    pub fn get(&self, column: Column) -> f64 {
        column.value(self)
    }
}

/// Division that marks a zero denominator as undefined (NaN) instead of
/// producing ±inf.
pub fn ratio_or_nan(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}

/// Numeric columns of the production table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    OilBbl,
    GasMscf,
    WaterBbl,
    TubingHeadPressurePsi,
    LinePressurePsi,
    TemperatureC,
    ChokePercent,
    OperatingHours,
    TotalLiquid,
    WaterCut,
    GasOilRatio,
    BoeEquivalent,
}

impl Column {
    pub const ALL: [Column; 12] = [
        Column::OilBbl,
        Column::GasMscf,
        Column::WaterBbl,
        Column::TubingHeadPressurePsi,
        Column::LinePressurePsi,
        Column::TemperatureC,
        Column::ChokePercent,
        Column::OperatingHours,
        Column::TotalLiquid,
        Column::WaterCut,
        Column::GasOilRatio,
        Column::BoeEquivalent,
    ];

    /// The measured (non-derived) columns.
    pub const MEASURED: [Column; 8] = [
        Column::OilBbl,
        Column::GasMscf,
        Column::WaterBbl,
        Column::TubingHeadPressurePsi,
        Column::LinePressurePsi,
        Column::TemperatureC,
        Column::ChokePercent,
        Column::OperatingHours,
    ];

    /// Header name, identical to the serialized field name.
    pub fn name(&self) -> &'static str {
        match self {
            Column::OilBbl => "oil_bbl",
            Column::GasMscf => "gas_mscf",
            Column::WaterBbl => "water_bbl",
            Column::TubingHeadPressurePsi => "tubing_head_pressure_psi",
            Column::LinePressurePsi => "line_pressure_psi",
            Column::TemperatureC => "temperature_c",
            Column::ChokePercent => "choke_percent",
            Column::OperatingHours => "operating_hours",
            Column::TotalLiquid => "total_liquid",
            Column::WaterCut => "water_cut",
            Column::GasOilRatio => "gas_oil_ratio",
            Column::BoeEquivalent => "boe_equivalent",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn value(&self, r: &ProductionRecord) -> f64 {
        match self {
            Column::OilBbl => r.oil_bbl,
            Column::GasMscf => r.gas_mscf,
            Column::WaterBbl => r.water_bbl,
            Column::TubingHeadPressurePsi => r.tubing_head_pressure_psi,
            Column::LinePressurePsi => r.line_pressure_psi,
            Column::TemperatureC => r.temperature_c,
            Column::ChokePercent => r.choke_percent,
            Column::OperatingHours => r.operating_hours,
            Column::TotalLiquid => r.total_liquid,
            Column::WaterCut => r.water_cut,
            Column::GasOilRatio => r.gas_oil_ratio,
            Column::BoeEquivalent => r.boe_equivalent,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
