//! prodsynth: Synthetic Oil-Well Production Data
//!
//! Generates daily production tables for synthetic oil fields and runs
//! basic statistics over them.
//!
//! ## Architecture
//!
//! - **Generator**: one stream of one well; exponential decline, Gaussian
//!   noise and an optional workover step change
//! - **Field Simulator**: many wells, three streams each, plus pressures,
//!   temperature, choke and downtime, assembled into a `ProductionTable`
//! - **Analysis**: Z-score outliers, column summaries, correlations and
//!   per-well roll-ups
//! - **Output**: CSV or JSON lines tables, JSON reports
//!
//! Every random draw goes through an explicit `Rng` handle, so a seeded run
//! is reproducible.

pub mod config;
pub mod types;
pub mod generator;
pub mod field;
pub mod analysis;
pub mod output;

// Re-export configuration
pub use config::{ConfigError, SimulationConfig};

// Re-export commonly used types
pub use types::{
    AnalysisReport, Column, DailyMeasurements, Intervention, ProductionRecord,
    ProductionSeries, ProductionTable, Stream,
};

// Re-export the generator and simulator
pub use generator::{generate, GenerationError, GenerationParameters, SeriesGenerator};
pub use field::{FieldSimulator, SimulationError, WellProfile};

// Re-export output
pub use output::{OutputDest, OutputError, OutputFormat};
