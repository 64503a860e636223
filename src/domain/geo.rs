use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in lat/lon degree space.
///
/// Distances are plain Euclidean norms over the raw degrees, not geodesic. They are only
/// used to rank helpers against each other, so the approximation is good enough.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn distance_to(&self, other: &Location) -> f64 {
        distance(self, other)
    }
}

pub fn distance(a: &Location, b: &Location) -> f64 {
    let dx = a.lat - b.lat;
    let dy = a.lon - b.lon;
    (dx * dx + dy * dy).sqrt()
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}
