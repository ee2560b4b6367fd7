//! Shared data structures for synthetic production data
//!
//! This module defines the core types that flow between the generator,
//! the field simulator and the analysis layer:
//! - `ProductionSeries`: one stream of one well, one value per day
//! - `Intervention`: a step-change (workover) event applied to a series
//! - `ProductionRecord`: one row of the production table (well × day)
//! - `ProductionTable`: the ordered table plus typed column access
//! - Analysis results: column summaries, outlier reports, correlations

mod series;
mod record;
mod table;
mod analysis;

pub use series::*;
pub use record::*;
pub use table::*;
pub use analysis::*;
