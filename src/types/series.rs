//! Production series types: Stream, Intervention, ProductionSeries

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// A measured production stream.
///
/// `Stream::ALL` is also the order in which the field simulator requests
/// noise draws for a well, so it must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stream {
    /// Oil rate (bbl/day)
    Oil,
    /// Gas rate (mscf/day)
    Gas,
    /// Water rate (bbl/day)
    Water,
}

impl Stream {
    pub const ALL: [Stream; 3] = [Stream::Oil, Stream::Gas, Stream::Water];

    pub fn unit(&self) -> &'static str {
        match self {
            Stream::Oil | Stream::Water => "bbl/d",
            Stream::Gas => "mscf/d",
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stream::Oil => "oil",
            Stream::Gas => "gas",
            Stream::Water => "water",
        };
        write!(f, "{name}")
    }
}

/// Step-change event (e.g. a workover) that rescales production
/// multiplicatively from `day` to the end of the horizon.
///
/// Carried as `Option<Intervention>`; `None` is the undisturbed path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    /// First affected day (0-indexed)
    pub day: usize,
    /// Multiplicative factor applied to the noisy value
    pub scale: f64,
}

impl Intervention {
    pub fn new(day: usize, scale: f64) -> Self {
        Self { day, scale }
    }

    /// Whether the event has taken effect on `day`.
    pub fn applies_to(&self, day: usize) -> bool {
        day >= self.day
    }
}

/// Daily production values for a single stream of a single well.
///
/// Every value is >= 0 and the length equals the horizon it was
/// generated for. Series are never mutated after generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProductionSeries {
    values: Vec<f64>,
}

impl ProductionSeries {
    pub(crate) fn from_values(values: Vec<f64>) -> Self {
        debug_assert!(values.iter().all(|v| *v >= 0.0));
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, day: usize) -> Option<f64> {
        self.values.get(day).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Sum over the horizon (cumulative production for rate series).
    pub fn cumulative(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }
}

impl Index<usize> for ProductionSeries {
    type Output = f64;

    fn index(&self, day: usize) -> &f64 {
        &self.values[day]
    }
}

impl AsRef<[f64]> for ProductionSeries {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_order_is_oil_gas_water() {
        assert_eq!(Stream::ALL, [Stream::Oil, Stream::Gas, Stream::Water]);
        assert_eq!(Stream::Gas.to_string(), "gas");
        assert_eq!(Stream::Gas.unit(), "mscf/d");
    }

    #[test]
    fn intervention_applies_from_its_day() {
        let iv = Intervention::new(5, 2.0);
        assert!(!iv.applies_to(4));
        assert!(iv.applies_to(5));
        assert!(iv.applies_to(100));
    }

    #[test]
    fn series_accessors() {
        let s = ProductionSeries::from_values(vec![3.0, 2.0, 1.0]);
        assert_eq!(s.len(), 3);
        assert_eq!(s[1], 2.0);
        assert_eq!(s.get(3), None);
        assert!((s.cumulative() - 6.0).abs() < 1e-12);
        assert_eq!(serde_json::to_string(&s).unwrap(), "[3.0,2.0,1.0]");
    }
}
