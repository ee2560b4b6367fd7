//! Simulation Configuration - every generator knob as a TOML value
//!
//! Each section implements `Default` with the values in [`super::defaults`],
//! so an empty file (or no file at all) reproduces the built-in field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::field::WellProfile;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one synthetic field run.
///
/// Load with `SimulationConfig::load()` which searches:
/// 1. `$PRODSYNTH_CONFIG` env var
/// 2. `./prodsynth.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Horizon, seed and well count
    #[serde(default)]
    pub simulation: SimulationSettings,

    /// Ranges wells are sampled from when `wells` is empty
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Noise and downtime of the ancillary measurements
    #[serde(default)]
    pub ancillary: AncillaryConfig,

    /// Statistics settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Explicit well profiles. When present, sampling is skipped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wells: Vec<WellProfile>,
}

impl SimulationConfig {
    /// Load configuration using the standard search order:
    /// 1. `$PRODSYNTH_CONFIG` environment variable
    /// 2. `./prodsynth.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded simulation config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./prodsynth.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded simulation config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Two-pass: unknown keys are reported as warnings first, then serde
    /// deserialization and validation run.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let typo_warnings = super::validation::validate_unknown_keys(contents);
        for w in &typo_warnings {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Number of wells a run will produce.
    pub fn effective_well_count(&self) -> usize {
        if self.wells.is_empty() {
            self.simulation.well_count
        } else {
            self.wells.len()
        }
    }

    /// Validate the config for internal consistency.
    ///
    /// Rules:
    /// - Horizon, well count and field count must be > 0
    /// - Every (min, max) range must be finite with min <= max
    /// - Probabilities must lie in [0, 1]
    /// - The outlier multiplier must be > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let sim = &self.simulation;
        if sim.days == 0 {
            errors.push("simulation.days must be > 0".to_string());
        }
        if let Some(seed) = sim.seed.filter(|s| *s > defaults::MAX_SEED) {
            errors.push(format!("simulation.seed = {seed} exceeds {}", defaults::MAX_SEED));
        }
        if self.wells.is_empty() {
            if sim.well_count == 0 {
                errors.push("simulation.well_count must be > 0 when no [[wells]] are given".to_string());
            }
            if sim.field_count == 0 {
                errors.push("simulation.field_count must be > 0 when no [[wells]] are given".to_string());
            }
        }

        let s = &self.sampling;
        Self::check_range(s.oil_initial_bbl, "sampling.oil_initial_bbl", &mut errors);
        Self::check_range(s.gas_oil_ratio, "sampling.gas_oil_ratio", &mut errors);
        Self::check_range(s.water_initial_bbl, "sampling.water_initial_bbl", &mut errors);
        Self::check_range(s.hydrocarbon_decline, "sampling.hydrocarbon_decline", &mut errors);
        Self::check_range(s.water_decline, "sampling.water_decline", &mut errors);
        Self::check_range(s.intervention_scale, "sampling.intervention_scale", &mut errors);
        Self::check_range(s.intervention_window, "sampling.intervention_window", &mut errors);
        Self::check_range(s.tubing_head_pressure_psi, "sampling.tubing_head_pressure_psi", &mut errors);
        Self::check_range(s.line_pressure_psi, "sampling.line_pressure_psi", &mut errors);
        Self::check_range(s.temperature_c, "sampling.temperature_c", &mut errors);
        Self::check_range(s.choke_percent, "sampling.choke_percent", &mut errors);

        Self::check_probability(s.intervention_probability, "sampling.intervention_probability", &mut errors);
        Self::check_probability(self.ancillary.downtime_probability, "ancillary.downtime_probability", &mut errors);

        if !s.noise_fraction.is_finite() || s.noise_fraction < 0.0 {
            errors.push(format!("sampling.noise_fraction must be >= 0, got {}", s.noise_fraction));
        }

        let a = &self.ancillary;
        for (name, value) in [
            ("ancillary.pressure_noise_fraction", a.pressure_noise_fraction),
            ("ancillary.temperature_noise_c", a.temperature_noise_c),
            ("ancillary.choke_noise_percent", a.choke_noise_percent),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be >= 0, got {value}"));
            }
        }

        let k = self.analysis.outlier_sigma;
        if !k.is_finite() || k <= 0.0 {
            errors.push(format!("analysis.outlier_sigma must be > 0, got {k}"));
        }

        // Physical range validation
        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_range((min, max): (f64, f64), name: &str, errors: &mut Vec<String>) {
        // NaN/Inf comparisons silently pass, catch them explicitly
        if !min.is_finite() || !max.is_finite() {
            errors.push(format!("{name}: values must be finite (got [{min}, {max}])"));
            return;
        }
        if min > max {
            errors.push(format!("{name}: min ({min:.3}) must be <= max ({max:.3})"));
        }
    }

    fn check_probability(p: f64, name: &str, errors: &mut Vec<String>) {
        if !(0.0..=1.0).contains(&p) {
            errors.push(format!("{name} must be within [0, 1], got {p}"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Simulation Settings
// ============================================================================

/// Horizon and identity of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// RNG seed, at most `i64::MAX`. Absent: seeded from OS entropy (non-reproducible).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Date of day 0, written as a quoted "YYYY-MM-DD" string
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Horizon length in days
    #[serde(default = "default_days")]
    pub days: usize,

    /// Wells to sample when no explicit profiles are configured
    #[serde(default = "default_well_count")]
    pub well_count: usize,

    /// Fields sampled wells are spread across
    #[serde(default = "default_field_count")]
    pub field_count: usize,
}

pub fn default_start_date() -> NaiveDate {
    let (y, m, d) = defaults::DEFAULT_START_DATE;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}
fn default_days() -> usize {
    defaults::DEFAULT_DAYS
}
fn default_well_count() -> usize {
    defaults::DEFAULT_WELL_COUNT
}
fn default_field_count() -> usize {
    defaults::DEFAULT_FIELD_COUNT
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: None,
            start_date: default_start_date(),
            days: default_days(),
            well_count: default_well_count(),
            field_count: default_field_count(),
        }
    }
}

// ============================================================================
// Sampling Ranges
// ============================================================================

/// Uniform `[min, max]` ranges used to sample well profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Initial oil rate (bbl/d)
    pub oil_initial_bbl: (f64, f64),
    /// Gas-oil ratio (mscf/bbl) applied to the initial oil rate
    pub gas_oil_ratio: (f64, f64),
    /// Initial water rate (bbl/d)
    pub water_initial_bbl: (f64, f64),
    /// Annual decline shared by oil and gas
    pub hydrocarbon_decline: (f64, f64),
    /// Annual water decline (negative = rising)
    pub water_decline: (f64, f64),
    /// Noise std-dev as a fraction of the initial rate
    pub noise_fraction: f64,
    /// Chance a well gets a workover
    pub intervention_probability: f64,
    /// Workover uplift factor
    pub intervention_scale: (f64, f64),
    /// Fraction of the horizon a workover day is drawn from
    pub intervention_window: (f64, f64),
    pub tubing_head_pressure_psi: (f64, f64),
    pub line_pressure_psi: (f64, f64),
    pub temperature_c: (f64, f64),
    pub choke_percent: (f64, f64),
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            oil_initial_bbl: defaults::OIL_INITIAL_RANGE,
            gas_oil_ratio: defaults::GAS_OIL_RATIO_RANGE,
            water_initial_bbl: defaults::WATER_INITIAL_RANGE,
            hydrocarbon_decline: defaults::HYDROCARBON_DECLINE_RANGE,
            water_decline: defaults::WATER_DECLINE_RANGE,
            noise_fraction: defaults::NOISE_FRACTION,
            intervention_probability: defaults::INTERVENTION_PROBABILITY,
            intervention_scale: defaults::INTERVENTION_SCALE_RANGE,
            intervention_window: defaults::INTERVENTION_WINDOW,
            tubing_head_pressure_psi: defaults::TUBING_HEAD_PRESSURE_RANGE,
            line_pressure_psi: defaults::LINE_PRESSURE_RANGE,
            temperature_c: defaults::TEMPERATURE_RANGE,
            choke_percent: defaults::CHOKE_RANGE,
        }
    }
}

// ============================================================================
// Ancillary Measurements
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AncillaryConfig {
    /// Relative noise on tubing head and line pressure
    pub pressure_noise_fraction: f64,
    /// Absolute temperature noise (°C)
    pub temperature_noise_c: f64,
    /// Absolute choke noise (percentage points)
    pub choke_noise_percent: f64,
    /// Daily chance of a partial shut-in
    pub downtime_probability: f64,
}

impl Default for AncillaryConfig {
    fn default() -> Self {
        Self {
            pressure_noise_fraction: defaults::PRESSURE_NOISE_FRACTION,
            temperature_noise_c: defaults::TEMPERATURE_NOISE_C,
            choke_noise_percent: defaults::CHOKE_NOISE_PERCENT,
            downtime_probability: defaults::DOWNTIME_PROBABILITY,
        }
    }
}

// ============================================================================
// Analysis
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Z-score multiplier above which a row is an outlier
    pub outlier_sigma: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            outlier_sigma: defaults::OUTLIER_SIGMA,
        }
    }
}
