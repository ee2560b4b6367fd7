//! Well profiles: the per-well inputs of a field run

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SamplingConfig;
use crate::generator::{GenerationError, GenerationParameters};
use crate::types::{Intervention, Stream};

/// Everything needed to simulate one well.
///
/// Missing TOML fields fall back to a mid-range well (see `Default`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WellProfile {
    pub well_id: String,
    pub field_id: String,

    /// Day-0 oil rate (bbl/d)
    pub oil_initial_bbl: f64,
    /// Day-0 gas rate (mscf/d)
    pub gas_initial_mscf: f64,
    /// Day-0 water rate (bbl/d)
    pub water_initial_bbl: f64,

    pub oil_decline: f64,
    pub gas_decline: f64,
    /// Usually negative: water production rises as the reservoir depletes
    pub water_decline: f64,

    /// Noise std-dev as a fraction of each stream's initial rate
    pub noise_fraction: f64,

    /// Workover. Stimulates oil and gas; water is left alone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervention: Option<Intervention>,

    /// Baseline ancillary measurements
    pub tubing_head_pressure_psi: f64,
    pub line_pressure_psi: f64,
    pub temperature_c: f64,
    pub choke_percent: f64,
}

impl Default for WellProfile {
    fn default() -> Self {
        Self {
            well_id: String::new(),
            field_id: "F-1".to_string(),
            oil_initial_bbl: 1500.0,
            gas_initial_mscf: 1700.0,
            water_initial_bbl: 200.0,
            oil_decline: 0.2,
            gas_decline: 0.2,
            water_decline: -0.1,
            noise_fraction: crate::config::defaults::NOISE_FRACTION,
            intervention: None,
            tubing_head_pressure_psi: 1150.0,
            line_pressure_psi: 225.0,
            temperature_c: 75.0,
            choke_percent: 60.0,
        }
    }
}

impl WellProfile {
    pub fn new(well_id: impl Into<String>, field_id: impl Into<String>) -> Self {
        Self {
            well_id: well_id.into(),
            field_id: field_id.into(),
            ..Self::default()
        }
    }

    /// Well identifier for the `index`-th sampled well (0-based): `W-001`, ...
    pub fn sampled_well_id(index: usize) -> String {
        format!("W-{:03}", index + 1)
    }

    /// Field identifier for the `index`-th sampled well, round-robin.
    pub fn sampled_field_id(index: usize, field_count: usize) -> String {
        format!("F-{}", index % field_count.max(1) + 1)
    }

    /// Draw a profile from the configured ranges.
    ///
    /// Draw order: oil, GOR, water, hydrocarbon decline, water decline,
    /// tubing head pressure, line pressure, temperature, choke, workover
    /// roll, then workover day and scale if rolled.
    pub fn sample<R: Rng + ?Sized>(
        index: usize,
        field_count: usize,
        days: usize,
        ranges: &SamplingConfig,
        rng: &mut R,
    ) -> Self {
        let oil = uniform(rng, ranges.oil_initial_bbl);
        let gor = uniform(rng, ranges.gas_oil_ratio);
        let water = uniform(rng, ranges.water_initial_bbl);
        let hc_decline = uniform(rng, ranges.hydrocarbon_decline);
        let water_decline = uniform(rng, ranges.water_decline);
        let thp = uniform(rng, ranges.tubing_head_pressure_psi);
        let line = uniform(rng, ranges.line_pressure_psi);
        let temp = uniform(rng, ranges.temperature_c);
        let choke = uniform(rng, ranges.choke_percent);

        let intervention = if rng.gen_bool(ranges.intervention_probability) {
            let (first, last) = intervention_day_bounds(days, ranges.intervention_window);
            let day = rng.gen_range(first..=last);
            let scale = uniform(rng, ranges.intervention_scale);
            Some(Intervention::new(day, scale))
        } else {
            None
        };

        Self {
            well_id: Self::sampled_well_id(index),
            field_id: Self::sampled_field_id(index, field_count),
            oil_initial_bbl: oil,
            gas_initial_mscf: oil * gor,
            water_initial_bbl: water,
            oil_decline: hc_decline,
            gas_decline: hc_decline,
            water_decline,
            noise_fraction: ranges.noise_fraction,
            intervention,
            tubing_head_pressure_psi: thp,
            line_pressure_psi: line,
            temperature_c: temp,
            choke_percent: choke,
        }
    }

    pub fn initial_rate(&self, stream: Stream) -> f64 {
        match stream {
            Stream::Oil => self.oil_initial_bbl,
            Stream::Gas => self.gas_initial_mscf,
            Stream::Water => self.water_initial_bbl,
        }
    }

    pub fn decline(&self, stream: Stream) -> f64 {
        match stream {
            Stream::Oil => self.oil_decline,
            Stream::Gas => self.gas_decline,
            Stream::Water => self.water_decline,
        }
    }

    /// The workover, as seen by one stream.
    pub fn intervention_for(&self, stream: Stream) -> Option<Intervention> {
        match stream {
            Stream::Oil | Stream::Gas => self.intervention,
            Stream::Water => None,
        }
    }

    /// Generator input for one stream over `days`.
    pub fn series_parameters(&self, stream: Stream, days: usize) -> Result<GenerationParameters, GenerationError> {
        GenerationParameters::new(days, self.initial_rate(stream), self.decline(stream), self.noise_fraction)?
            .with_intervention(self.intervention_for(stream))
    }
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    rng.gen_range(min..=max)
}

/// Inclusive day bounds for a workover inside `window` (fractions of the
/// horizon), always within `[0, days)`.
fn intervention_day_bounds(days: usize, (lo, hi): (f64, f64)) -> (usize, usize) {
    let last_day = days.saturating_sub(1);
    let first = ((lo * days as f64).floor() as usize).min(last_day);
    let last = ((hi * days as f64).floor() as usize).clamp(first, last_day);
    (first, last)
}
