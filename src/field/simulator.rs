//! Field run loop: profiles → series → daily records

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use thiserror::Error;
use tracing::{debug, info};

use super::profile::WellProfile;
use crate::config::defaults::HOURS_PER_DAY;
use crate::config::{ConfigError, SimulationConfig};
use crate::generator::{daily_multiplier, GenerationError, SeriesGenerator};
use crate::types::{DailyMeasurements, ProductionRecord, ProductionSeries, ProductionTable, Stream};

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("well {well_id}, {stream} stream: {source}")]
    Generation {
        well_id: String,
        stream: Stream,
        #[source]
        source: GenerationError,
    },

    #[error("{what} noise rejected standard deviation {std_dev}")]
    Distribution { what: &'static str, std_dev: f64 },

    #[error("date overflow: {start} + {days} days")]
    DateOverflow { start: NaiveDate, days: usize },
}

/// Per-day noise sources for ancillary measurements.
struct AncillaryNoise {
    pressure: Normal<f64>,
    temperature: Normal<f64>,
    choke: Normal<f64>,
    downtime_probability: f64,
}

impl AncillaryNoise {
    fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        let a = &config.ancillary;
        Ok(Self {
            pressure: normal("pressure", a.pressure_noise_fraction)?,
            temperature: normal("temperature", a.temperature_noise_c)?,
            choke: normal("choke", a.choke_noise_percent)?,
            downtime_probability: a.downtime_probability,
        })
    }
}

fn normal(what: &'static str, std_dev: f64) -> Result<Normal<f64>, SimulationError> {
    Normal::new(0.0, std_dev).map_err(|_| SimulationError::Distribution { what, std_dev })
}

/// Generates the production table for a configured field.
pub struct FieldSimulator<'a> {
    config: &'a SimulationConfig,
    noise: AncillaryNoise,
    dates: Vec<NaiveDate>,
}

impl<'a> FieldSimulator<'a> {
    /// Validate the config and prepare the run.
    pub fn new(config: &'a SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let start = config.simulation.start_date;
        let days = config.simulation.days;
        let dates = (0..days)
            .map(|d| start.checked_add_days(Days::new(d as u64)))
            .collect::<Option<Vec<_>>>()
            .ok_or(SimulationError::DateOverflow { start, days })?;

        Ok(Self {
            config,
            noise: AncillaryNoise::from_config(config)?,
            dates,
        })
    }

    /// Run with an RNG seeded from the config (entropy when no seed is set).
    pub fn run(&self) -> Result<ProductionTable, SimulationError> {
        let mut rng = match self.config.simulation.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(&mut rng)
    }

    /// Run with a caller-supplied random source.
    pub fn run_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ProductionTable, SimulationError> {
        let profiles = self.profiles(rng);

        info!(
            wells = profiles.len(),
            days = self.days(),
            seed = ?self.config.simulation.seed,
            start = %self.config.simulation.start_date,
            "Simulating field production"
        );

        let mut records = Vec::with_capacity(profiles.len() * self.days());
        for profile in &profiles {
            records.extend(self.simulate_well(profile, rng)?);
        }

        let table = ProductionTable::new(records);
        info!(rows = table.len(), "Field simulation complete");
        Ok(table)
    }

    /// Explicit profiles from the config, or freshly sampled ones.
    pub fn profiles<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<WellProfile> {
        if !self.config.wells.is_empty() {
            return self.config.wells.clone();
        }
        let sim = &self.config.simulation;
        (0..sim.well_count)
            .map(|i| WellProfile::sample(i, sim.field_count, sim.days, &self.config.sampling, rng))
            .collect()
    }

    pub fn days(&self) -> usize {
        self.dates.len()
    }

    /// Generate every stream of one well and assemble its daily records.
    pub fn simulate_well<R: Rng + ?Sized>(
        &self,
        profile: &WellProfile,
        rng: &mut R,
    ) -> Result<Vec<ProductionRecord>, SimulationError> {
        let days = self.days();
        let [oil, gas, water] = Stream::ALL.map(|stream| {
            profile
                .series_parameters(stream, days)
                .and_then(|params| SeriesGenerator::generate(&params, rng))
                .map_err(|source| SimulationError::Generation {
                    well_id: profile.well_id.clone(),
                    stream,
                    source,
                })
        });
        let (oil, gas, water) = (oil?, gas?, water?);

        debug!(
            well = %profile.well_id,
            field = %profile.field_id,
            cumulative_oil = oil.cumulative(),
            intervention = ?profile.intervention,
            "Generated well streams"
        );

        let oil_decay = daily_multiplier(profile.oil_decline);
        let mut records = Vec::with_capacity(days);
        for (day, date) in self.dates.iter().enumerate() {
            let m = self.measure_day(profile, day, oil_decay, [&oil, &gas, &water], rng);
            records.push(ProductionRecord::new(*date, &profile.well_id, &profile.field_id, m));
        }
        Ok(records)
    }

    /// Ancillary draws for one day, in order: tubing head pressure, line
    /// pressure, temperature, choke, downtime roll (+ hours when rolled).
    fn measure_day<R: Rng + ?Sized>(
        &self,
        profile: &WellProfile,
        day: usize,
        oil_decay: f64,
        [oil, gas, water]: [&ProductionSeries; 3],
        rng: &mut R,
    ) -> DailyMeasurements {
        let n = &self.noise;

        // Wellhead pressure follows the oil decline curve
        let thp_trend = profile.tubing_head_pressure_psi * oil_decay.powf(day as f64);
        let thp = (thp_trend * (1.0 + n.pressure.sample(rng))).max(0.0);
        let line = (profile.line_pressure_psi * (1.0 + n.pressure.sample(rng))).max(0.0);
        let temperature = profile.temperature_c + n.temperature.sample(rng);
        let choke = (profile.choke_percent + n.choke.sample(rng)).clamp(0.0, 100.0);

        let operating_hours = if rng.gen_bool(n.downtime_probability) {
            rng.gen_range(0.0..HOURS_PER_DAY)
        } else {
            HOURS_PER_DAY
        };
        let uptime = operating_hours / HOURS_PER_DAY;

        DailyMeasurements {
            oil_bbl: oil[day] * uptime,
            gas_mscf: gas[day] * uptime,
            water_bbl: water[day] * uptime,
            tubing_head_pressure_psi: thp,
            line_pressure_psi: line,
            temperature_c: temperature,
            choke_percent: choke,
            operating_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Intervention;

    fn small_config(seed: u64) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.simulation.seed = Some(seed);
        config.simulation.days = 60;
        config.simulation.well_count = 4;
        config.simulation.field_count = 2;
        config
    }

    #[test]
    fn table_has_one_row_per_well_per_day() {
        let config = small_config(1);
        let table = FieldSimulator::new(&config).unwrap().run().unwrap();
        assert_eq!(table.len(), 4 * 60);
        assert_eq!(table.well_ids(), vec!["W-001", "W-002", "W-003", "W-004"]);
        assert_eq!(table.field_ids(), vec!["F-1", "F-2"]);
        let (first, last) = table.date_range().unwrap();
        assert_eq!(first, config.simulation.start_date);
        assert_eq!((last - first).num_days(), 59);
    }

    #[test]
    fn seeded_runs_are_identical() {
        let config = small_config(99);
        let a = FieldSimulator::new(&config).unwrap().run().unwrap();
        let b = FieldSimulator::new(&config).unwrap().run().unwrap();
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[test]
    fn different_seeds_differ() {
        let a = FieldSimulator::new(&small_config(1)).unwrap().run().unwrap();
        let b = FieldSimulator::new(&small_config(2)).unwrap().run().unwrap();
        assert_ne!(a.records()[0].oil_bbl, b.records()[0].oil_bbl);
    }

    #[test]
    fn measurements_stay_in_physical_bounds() {
        let mut config = small_config(5);
        config.ancillary.downtime_probability = 0.3;
        let table = FieldSimulator::new(&config).unwrap().run().unwrap();
        for r in &table {
            assert!(r.oil_bbl >= 0.0 && r.gas_mscf >= 0.0 && r.water_bbl >= 0.0);
            assert!((0.0..=100.0).contains(&r.choke_percent));
            assert!((0.0..=24.0).contains(&r.operating_hours));
            assert!(r.tubing_head_pressure_psi >= 0.0);
        }
        assert!(table.iter().any(|r| r.operating_hours < 24.0));
    }

    #[test]
    fn explicit_noiseless_well_follows_decline_and_workover() {
        let mut config = small_config(3);
        config.ancillary.downtime_probability = 0.0;
        let mut well = WellProfile::new("W-X", "F-9");
        well.noise_fraction = 0.0;
        well.oil_initial_bbl = 1000.0;
        well.oil_decline = 0.0;
        well.water_decline = 0.0;
        well.intervention = Some(Intervention::new(30, 1.5));
        config.wells = vec![well];

        let table = FieldSimulator::new(&config).unwrap().run().unwrap();
        let oil = table.column(crate::types::Column::OilBbl);
        assert_eq!(oil.len(), 60);
        assert!(oil[..30].iter().all(|v| *v == 1000.0));
        assert!(oil[30..].iter().all(|v| *v == 1500.0));
        // Water is not stimulated by the workover
        let water = table.column(crate::types::Column::WaterBbl);
        assert!(water.iter().all(|v| *v == 200.0));
    }

    #[test]
    fn downtime_scales_rates_by_uptime() {
        let mut config = small_config(8);
        config.ancillary.downtime_probability = 1.0;
        let mut well = WellProfile::new("W-X", "F-1");
        well.noise_fraction = 0.0;
        well.oil_decline = 0.0;
        config.wells = vec![well];

        let table = FieldSimulator::new(&config).unwrap().run().unwrap();
        for r in &table {
            let expected = 1500.0 * r.operating_hours / 24.0;
            assert!((r.oil_bbl - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let mut config = small_config(1);
        config.simulation.days = 0;
        assert!(matches!(FieldSimulator::new(&config), Err(SimulationError::Config(_))));
    }

    #[test]
    fn caller_supplied_rng_matches_seeded_run() {
        let config = small_config(21);
        let sim = FieldSimulator::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let seeded = serde_json::to_string(&sim.run().unwrap()).unwrap();
        let supplied = serde_json::to_string(&sim.run_with_rng(&mut rng).unwrap()).unwrap();
        assert_eq!(seeded, supplied);
    }
}
