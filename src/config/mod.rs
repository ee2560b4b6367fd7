//! Simulation Configuration Module
//!
//! Describes a synthetic field (horizon, seed, wells or the ranges wells are
//! sampled from) and the analysis settings, loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. Explicit path (`--config`)
//! 2. `PRODSYNTH_CONFIG` environment variable (path to TOML file)
//! 3. `prodsynth.toml` in the current working directory
//! 4. Built-in defaults (see [`defaults`])
//!
//! ## Usage
//!
//! ```ignore
//! let config = SimulationConfig::load();
//! let table = FieldSimulator::new(&config)?.run()?;
//! ```
//!
//! The config is passed by reference; there is no process-wide instance.

mod sim_config;
pub mod defaults;
pub mod validation;

pub use sim_config::*;
