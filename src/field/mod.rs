//! Field Simulator
//!
//! Builds the production table (one row per well per day) for a synthetic
//! field. Each well's oil, gas and water rates come from the
//! [`SeriesGenerator`](crate::generator::SeriesGenerator); pressures,
//! temperature, choke and operating hours are drawn around per-well
//! baselines.
//!
//! ## Draw Order
//!
//! One `StdRng` is seeded once per run and every draw advances it in this
//! fixed order, which makes a seeded run bit-reproducible:
//!
//! 1. Well profiles, if sampled (per well: rates, declines, ancillary
//!    baselines, workover roll, then workover day and scale when rolled)
//! 2. Per well, in profile order:
//!    - oil series, gas series, water series (one noise draw per day each)
//!    - per day: tubing head pressure, line pressure, temperature, choke,
//!      downtime roll, then downtime hours when rolled
//!
//! ## Architecture
//! - `profile`: `WellProfile` and profile sampling
//! - `simulator`: `FieldSimulator`, the run loop

mod profile;
mod simulator;

pub use profile::WellProfile;
pub use simulator::{FieldSimulator, SimulationError};
