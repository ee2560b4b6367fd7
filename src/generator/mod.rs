//! Synthetic Production Series Generator
//!
//! Produces a daily rate series for one stream of one well: exponential
//! decline from an initial rate, Gaussian noise proportional to that rate,
//! and an optional step-change intervention (workover) that rescales the
//! noisy values from a given day onward.
//!
//! ## Determinism
//!
//! The random source is passed in explicitly. A call draws exactly one
//! noise sample per day, in day order, whatever the noise fraction, so the
//! state an RNG is left in depends only on the horizon.
//!
//! ```ignore
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let params = GenerationParameters::new(365, 1000.0, 0.2, 0.05)?
//!     .with_intervention(Intervention::new(180, 1.5))?;
//! let oil = SeriesGenerator::generate(&params, &mut rng)?;
//! ```

mod params;
mod series_generator;

pub use params::{GenerationError, GenerationParameters, DAYS_PER_YEAR};
pub use series_generator::{daily_multiplier, generate, SeriesGenerator};
