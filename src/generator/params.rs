//! Validated generation parameters

use serde::Serialize;
use thiserror::Error;

use crate::types::Intervention;

/// Days over which the annual decline fraction compounds.
pub const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Error, PartialEq)]
pub enum GenerationError {
    #[error("horizon must be at least 1 day")]
    EmptyHorizon,

    #[error("initial rate must be a finite value >= 0, got {0}")]
    InvalidInitialRate(f64),

    #[error("annual decline must be finite and < 1, got {0}")]
    InvalidDecline(f64),

    #[error("noise fraction must be a finite value >= 0, got {0}")]
    InvalidNoiseFraction(f64),

    #[error("intervention day {day} is outside the horizon [0, {horizon})")]
    InterventionOutOfRange { day: usize, horizon: usize },

    #[error("intervention scale factor must be finite and > 0, got {0}")]
    InvalidScaleFactor(f64),

    #[error("noise distribution rejected standard deviation {0}")]
    NoiseDistribution(f64),
}

/// Immutable input to one generation call.
///
/// Fields are private so every instance has passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParameters {
    horizon: usize,
    initial_rate: f64,
    annual_decline: f64,
    noise_fraction: f64,
    intervention: Option<Intervention>,
}

impl GenerationParameters {
    /// Validate and build parameters without an intervention.
    ///
    /// A negative `annual_decline` describes a rising trend; values >= 1
    /// would zero or invert the decay and are rejected.
    pub fn new(
        horizon: usize,
        initial_rate: f64,
        annual_decline: f64,
        noise_fraction: f64,
    ) -> Result<Self, GenerationError> {
        if horizon == 0 {
            return Err(GenerationError::EmptyHorizon);
        }
        if !initial_rate.is_finite() || initial_rate < 0.0 {
            return Err(GenerationError::InvalidInitialRate(initial_rate));
        }
        if !annual_decline.is_finite() || annual_decline >= 1.0 {
            return Err(GenerationError::InvalidDecline(annual_decline));
        }
        if !noise_fraction.is_finite() || noise_fraction < 0.0 {
            return Err(GenerationError::InvalidNoiseFraction(noise_fraction));
        }
        Ok(Self {
            horizon,
            initial_rate,
            annual_decline,
            noise_fraction,
            intervention: None,
        })
    }

    /// Attach (or clear, with `None`) the step-change event.
    pub fn with_intervention(
        mut self,
        intervention: impl Into<Option<Intervention>>,
    ) -> Result<Self, GenerationError> {
        let intervention = intervention.into();
        if let Some(iv) = intervention {
            if iv.day >= self.horizon {
                return Err(GenerationError::InterventionOutOfRange {
                    day: iv.day,
                    horizon: self.horizon,
                });
            }
            if !iv.scale.is_finite() || iv.scale <= 0.0 {
                return Err(GenerationError::InvalidScaleFactor(iv.scale));
            }
        }
        self.intervention = intervention;
        Ok(self)
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn initial_rate(&self) -> f64 {
        self.initial_rate
    }

    pub fn annual_decline(&self) -> f64 {
        self.annual_decline
    }

    pub fn noise_fraction(&self) -> f64 {
        self.noise_fraction
    }

    pub fn intervention(&self) -> Option<Intervention> {
        self.intervention
    }

    /// Standard deviation of the per-day noise (absolute units).
    pub fn noise_std_dev(&self) -> f64 {
        self.noise_fraction * self.initial_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_parameters() {
        let p = GenerationParameters::new(365, 1000.0, 0.2, 0.05).unwrap();
        assert_eq!(p.horizon(), 365);
        assert!((p.noise_std_dev() - 50.0).abs() < 1e-12);
        assert!(p.intervention().is_none());
    }

    #[test]
    fn accepts_negative_decline_and_zero_rate() {
        assert!(GenerationParameters::new(10, 0.0, -0.5, 0.0).is_ok());
    }

    #[test]
    fn rejects_zero_horizon() {
        assert_eq!(
            GenerationParameters::new(0, 100.0, 0.1, 0.0),
            Err(GenerationError::EmptyHorizon)
        );
    }

    #[test]
    fn rejects_negative_or_nan_rate() {
        assert!(matches!(
            GenerationParameters::new(10, -1.0, 0.1, 0.0),
            Err(GenerationError::InvalidInitialRate(_))
        ));
        assert!(matches!(
            GenerationParameters::new(10, f64::NAN, 0.1, 0.0),
            Err(GenerationError::InvalidInitialRate(_))
        ));
    }

    #[test]
    fn rejects_decline_of_one_or_more() {
        assert_eq!(
            GenerationParameters::new(10, 100.0, 1.0, 0.0),
            Err(GenerationError::InvalidDecline(1.0))
        );
        assert!(GenerationParameters::new(10, 100.0, 1.5, 0.0).is_err());
        assert!(GenerationParameters::new(10, 100.0, 0.999, 0.0).is_ok());
    }

    #[test]
    fn rejects_negative_noise() {
        assert_eq!(
            GenerationParameters::new(10, 100.0, 0.1, -0.1),
            Err(GenerationError::InvalidNoiseFraction(-0.1))
        );
    }

    #[test]
    fn intervention_day_must_lie_within_horizon() {
        let p = GenerationParameters::new(10, 100.0, 0.0, 0.0).unwrap();
        assert!(p.with_intervention(Intervention::new(0, 2.0)).is_ok());
        assert!(p.with_intervention(Intervention::new(9, 2.0)).is_ok());
        assert_eq!(
            p.with_intervention(Intervention::new(10, 2.0)),
            Err(GenerationError::InterventionOutOfRange { day: 10, horizon: 10 })
        );
    }

    #[test]
    fn intervention_scale_must_be_positive() {
        let p = GenerationParameters::new(10, 100.0, 0.0, 0.0).unwrap();
        assert_eq!(
            p.with_intervention(Intervention::new(3, 0.0)),
            Err(GenerationError::InvalidScaleFactor(0.0))
        );
        assert!(p.with_intervention(Intervention::new(3, -1.0)).is_err());
        assert!(p.with_intervention(Intervention::new(3, f64::INFINITY)).is_err());
    }

    #[test]
    fn error_messages_name_the_offending_value() {
        let err = GenerationParameters::new(10, 100.0, 1.2, 0.0).unwrap_err();
        assert_eq!(err.to_string(), "annual decline must be finite and < 1, got 1.2");
    }
}
