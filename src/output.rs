//! Table and report writers
//!
//! - CSV: one header row, columns in record field order, NaN written as `NaN`
//! - JSON lines: one object per record, NaN written as `null`
//! - Reports: pretty-printed JSON

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::types::{AnalysisReport, ProductionTable};

/// CSV header, matching `ProductionRecord` field order.
pub const CSV_HEADER: [&str; 15] = [
    "date",
    "well_id",
    "field_id",
    "oil_bbl",
    "gas_mscf",
    "water_bbl",
    "tubing_head_pressure_psi",
    "line_pressure_psi",
    "temperature_c",
    "choke_percent",
    "operating_hours",
    "total_liquid",
    "water_cut",
    "gas_oil_ratio",
    "boe_equivalent",
];

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Table serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    /// JSON lines
    Json,
}

/// Where output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDest {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl OutputDest {
    /// Open a buffered writer for this destination. Files are truncated.
    pub fn writer(&self) -> Result<Box<dyn Write>, OutputError> {
        match self {
            OutputDest::Stdout => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
            OutputDest::Stderr => Ok(Box::new(io::stderr().lock())),
            OutputDest::File(path) => {
                let file = File::create(path).map_err(|source| OutputError::Create {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

/// `<output>.report.json` next to a table written to `output`.
pub fn report_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(".report.json");
    PathBuf::from(name)
}

/// Write the table to `dest` in `format`.
pub fn write_table(table: &ProductionTable, format: OutputFormat, dest: &OutputDest) -> Result<(), OutputError> {
    let writer = dest.writer()?;
    match format {
        OutputFormat::Csv => write_csv(table, writer)?,
        OutputFormat::Json => write_json_lines(table, writer)?,
    }
    debug!(rows = table.len(), ?format, ?dest, "Table written");
    Ok(())
}

/// CSV with a header row. The header is written even for an empty table.
pub fn write_csv<W: Write>(table: &ProductionTable, writer: W) -> Result<(), OutputError> {
    let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(CSV_HEADER)?;
    for record in table {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}

/// One JSON object per line.
pub fn write_json_lines<W: Write>(table: &ProductionTable, mut writer: W) -> Result<(), OutputError> {
    for record in table {
        serde_json::to_writer(&mut writer, record)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Pretty JSON report.
pub fn write_report(report: &AnalysisReport, dest: &OutputDest) -> Result<(), OutputError> {
    write_pretty(report, dest.writer()?)
}

fn write_pretty<T: Serialize, W: Write>(value: &T, mut writer: W) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
