//! System-wide default constants.
//!
//! Centralises the magic numbers of the simulator and config loader.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Config Loading
// ============================================================================

/// Environment variable naming a config file path.
pub const CONFIG_ENV_VAR: &str = "PRODSYNTH_CONFIG";

/// Config file looked up in the current working directory.
pub const LOCAL_CONFIG_FILE: &str = "prodsynth.toml";

// ============================================================================
// Simulation Horizon
// ============================================================================

/// Default horizon (days). 730 = two years of daily allocation data.
pub const DEFAULT_DAYS: usize = 730;

/// Number of wells sampled when none are configured explicitly.
pub const DEFAULT_WELL_COUNT: usize = 10;

/// Number of fields sampled wells are distributed across (round-robin).
pub const DEFAULT_FIELD_COUNT: usize = 3;

/// Largest seed a config can carry (TOML integers are signed 64-bit).
pub const MAX_SEED: u64 = i64::MAX as u64;

/// Default first production date (year, month, day).
pub const DEFAULT_START_DATE: (i32, u32, u32) = (2022, 1, 1);

// ============================================================================
// Sampled Well Profiles
// ============================================================================

/// Initial oil rate range (bbl/d).
pub const OIL_INITIAL_RANGE: (f64, f64) = (500.0, 2500.0);

/// Initial gas-oil ratio range (mscf/bbl); gas rate = oil rate × GOR.
pub const GAS_OIL_RATIO_RANGE: (f64, f64) = (0.8, 1.5);

/// Initial water rate range (bbl/d).
pub const WATER_INITIAL_RANGE: (f64, f64) = (50.0, 400.0);

/// Annual decline fraction range for oil and gas.
pub const HYDROCARBON_DECLINE_RANGE: (f64, f64) = (0.10, 0.35);

/// Annual decline range for water. Negative: water production rises.
pub const WATER_DECLINE_RANGE: (f64, f64) = (-0.30, 0.0);

/// Noise standard deviation as a fraction of the initial rate.
pub const NOISE_FRACTION: f64 = 0.05;

/// Probability that a sampled well receives a workover.
pub const INTERVENTION_PROBABILITY: f64 = 0.3;

/// Workover uplift range (multiplicative).
pub const INTERVENTION_SCALE_RANGE: (f64, f64) = (1.2, 1.8);

/// Workovers are placed inside this fraction window of the horizon.
pub const INTERVENTION_WINDOW: (f64, f64) = (0.2, 0.8);

// ============================================================================
// Ancillary Measurements
// ============================================================================

/// Baseline tubing head pressure range (psi).
pub const TUBING_HEAD_PRESSURE_RANGE: (f64, f64) = (800.0, 1500.0);

/// Baseline flow line pressure range (psi).
pub const LINE_PRESSURE_RANGE: (f64, f64) = (150.0, 300.0);

/// Baseline wellhead temperature range (°C).
pub const TEMPERATURE_RANGE: (f64, f64) = (60.0, 90.0);

/// Baseline choke opening range (%).
pub const CHOKE_RANGE: (f64, f64) = (40.0, 80.0);

/// Relative noise on tubing head and line pressure.
pub const PRESSURE_NOISE_FRACTION: f64 = 0.02;

/// Absolute temperature noise (°C).
pub const TEMPERATURE_NOISE_C: f64 = 1.5;

/// Absolute choke noise (percentage points).
pub const CHOKE_NOISE_PERCENT: f64 = 2.0;

/// Probability of a partial-day shut-in on any given day.
pub const DOWNTIME_PROBABILITY: f64 = 0.05;

pub const HOURS_PER_DAY: f64 = 24.0;

// ============================================================================
// Analysis
// ============================================================================

/// Default Z-score multiplier for outlier flagging.
pub const OUTLIER_SIGMA: f64 = 3.0;
