//! Decline + noise + intervention series generation

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::trace;

use super::params::{GenerationError, GenerationParameters, DAYS_PER_YEAR};
use crate::types::{Intervention, ProductionSeries};

/// Daily multiplier that compounds to `1 - annual_decline` over 365 days.
pub fn daily_multiplier(annual_decline: f64) -> f64 {
    (1.0 - annual_decline).powf(1.0 / DAYS_PER_YEAR)
}

/// Stateless production series generator
pub struct SeriesGenerator;

impl SeriesGenerator {
    /// Generate one series.
    ///
    /// 1. trend(i) = initial_rate * m^i with m = (1 - decline)^(1/365)
    /// 2. add one N(0, noise_fraction * initial_rate) draw per day
    /// 3. multiply days >= intervention.day by intervention.scale
    /// 4. clamp to >= 0
    pub fn generate<R: Rng + ?Sized>(
        params: &GenerationParameters,
        rng: &mut R,
    ) -> Result<ProductionSeries, GenerationError> {
        let sigma = params.noise_std_dev();
        let noise = Normal::new(0.0, sigma).map_err(|_| GenerationError::NoiseDistribution(sigma))?;

        let mut values: Vec<f64> = Self::trend(params)
            .into_iter()
            .map(|t| t + noise.sample(rng))
            .collect();

        if let Some(iv) = params.intervention() {
            Self::apply_intervention(&mut values, iv);
        }

        for v in &mut values {
            *v = v.max(0.0);
        }

        trace!(
            horizon = params.horizon(),
            initial_rate = params.initial_rate(),
            annual_decline = params.annual_decline(),
            "Generated production series"
        );

        Ok(ProductionSeries::from_values(values))
    }

    /// Undisturbed decline curve, without noise or intervention.
    pub fn trend(params: &GenerationParameters) -> Vec<f64> {
        let m = daily_multiplier(params.annual_decline());
        (0..params.horizon())
            .map(|day| params.initial_rate() * m.powf(day as f64))
            .collect()
    }

    fn apply_intervention(values: &mut [f64], iv: Intervention) {
        for v in values.iter_mut().skip(iv.day) {
            *v *= iv.scale;
        }
    }
}

/// Validate the raw inputs and generate in one call.
pub fn generate<R: Rng + ?Sized>(
    horizon: usize,
    initial_rate: f64,
    annual_decline: f64,
    noise_fraction: f64,
    intervention: Option<Intervention>,
    rng: &mut R,
) -> Result<ProductionSeries, GenerationError> {
    let params = GenerationParameters::new(horizon, initial_rate, annual_decline, noise_fraction)?
        .with_intervention(intervention)?;
    SeriesGenerator::generate(&params, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn noiseless_series_matches_decline_formula() {
        let series = generate(200, 500.0, 0.3, 0.0, None, &mut rng()).unwrap();
        let m = 0.7_f64.powf(1.0 / 365.0);
        assert_eq!(series.len(), 200);
        for (i, v) in series.iter().enumerate() {
            let expected = 500.0 * m.powf(i as f64);
            assert!((v - expected).abs() < 1e-9, "day {i}: {v} != {expected}");
        }
    }

    #[test]
    fn one_year_decline_of_twenty_percent() {
        let series = generate(365, 1000.0, 0.2, 0.0, None, &mut rng()).unwrap();
        assert_eq!(series.len(), 365);
        assert_eq!(series[0], 1000.0);
        assert!(series.values().windows(2).all(|w| w[1] < w[0]));

        // Last element is day 364; one more day compounds to exactly 0.8.
        let last = series[364];
        assert!((last - 1000.0 * 0.8_f64.powf(364.0 / 365.0)).abs() < 1e-9);
        assert!((last * daily_multiplier(0.2) - 800.0).abs() < 1e-9);
        assert!((last - 800.0).abs() < 1.0);
    }

    #[test]
    fn step_intervention_doubles_from_its_day() {
        let series = generate(10, 100.0, 0.0, 0.0, Some(Intervention::new(5, 2.0)), &mut rng()).unwrap();
        assert_eq!(
            series.values(),
            &[100.0, 100.0, 100.0, 100.0, 100.0, 200.0, 200.0, 200.0, 200.0, 200.0]
        );
    }

    #[test]
    fn intervention_scales_trend_after_its_day_only() {
        let params = GenerationParameters::new(60, 750.0, 0.25, 0.0)
            .unwrap()
            .with_intervention(Intervention::new(20, 1.4))
            .unwrap();
        let trend = SeriesGenerator::trend(&params);
        let series = SeriesGenerator::generate(&params, &mut rng()).unwrap();
        for day in 0..60 {
            let expected = if day < 20 { trend[day] } else { 1.4 * trend[day] };
            assert!((series[day] - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn intervention_scales_the_noisy_value() {
        let plain = generate(200, 500.0, 0.2, 0.1, None, &mut StdRng::seed_from_u64(5)).unwrap();
        let worked = generate(200, 500.0, 0.2, 0.1, Some(Intervention::new(50, 1.7)), &mut StdRng::seed_from_u64(5)).unwrap();

        // Same draws on both runs, so the workover is an exact multiple of the noisy value
        for day in 0..200 {
            let expected = if day < 50 { plain[day] } else { plain[day] * 1.7 };
            assert_eq!(worked[day], expected, "day {day}");
        }
        let trend = SeriesGenerator::trend(&GenerationParameters::new(200, 500.0, 0.2, 0.1).unwrap());
        assert!(plain.iter().zip(&trend).any(|(v, t)| v != *t), "noise was not applied");
    }

    #[test]
    fn heavy_noise_is_clamped_at_zero() {
        let series = generate(1000, 10.0, 0.5, 5.0, None, &mut rng()).unwrap();
        assert!(series.iter().all(|v| v >= 0.0));
        assert!(series.iter().any(|v| v == 0.0), "expected some clamped days");
    }

    #[test]
    fn negative_decline_grows() {
        let series = generate(365, 100.0, -0.5, 0.0, None, &mut rng()).unwrap();
        assert!(series.values().windows(2).all(|w| w[1] > w[0]));
        assert!((series[364] * daily_multiplier(-0.5) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn zero_initial_rate_gives_all_zero_series() {
        let series = generate(30, 0.0, 0.2, 0.5, None, &mut rng()).unwrap();
        assert!(series.iter().all(|v| v == 0.0));
    }

    #[test]
    fn same_seed_same_series() {
        let a = generate(100, 1000.0, 0.2, 0.1, None, &mut rng()).unwrap();
        let b = generate(100, 1000.0, 0.2, 0.1, None, &mut rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn draw_count_is_independent_of_noise_fraction() {
        use rand::RngCore;

        let mut quiet = rng();
        let mut noisy = rng();
        generate(50, 1000.0, 0.2, 0.0, None, &mut quiet).unwrap();
        generate(50, 1000.0, 0.2, 0.3, None, &mut noisy).unwrap();
        assert_eq!(quiet.next_u64(), noisy.next_u64());
    }

    #[test]
    fn invalid_input_is_rejected_before_drawing() {
        let err = generate(10, 100.0, 0.0, 0.0, Some(Intervention::new(12, 2.0)), &mut rng());
        assert!(matches!(err, Err(GenerationError::InterventionOutOfRange { .. })));
    }
}
