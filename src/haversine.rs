//! Great-circle distance estimation (fallback when the routing provider is
//! unavailable).
//!
//! Ignores roads entirely, so it under-estimates real driving distance, but
//! it is always available and deterministic.

use serde::{Deserialize, Serialize};

use crate::stop::Coordinate;

/// Average driving speed assumption for time estimation.
pub const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Straight-line distance between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoDistance {
    pub distance_meters: f64,
    pub distance_km: f64,
}

/// Haversine distance between two points in meters.
pub fn haversine_meters(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

pub fn estimate(from: Coordinate, to: Coordinate) -> GeoDistance {
    let distance_meters = haversine_meters(from, to);
    GeoDistance {
        distance_meters,
        distance_km: distance_meters / 1000.0,
    }
}

/// Haversine-based distance/duration estimator.
///
/// Estimates travel time using straight-line distance and an assumed speed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HaversineEstimator {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineEstimator {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineEstimator {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Convert distance in meters to travel time in seconds.
    pub fn meters_to_seconds(&self, meters: f64) -> f64 {
        let hours = (meters / 1000.0) / self.speed_kmh;
        hours * 3600.0
    }

    /// Distance of each consecutive leg along `points`, in meters.
    pub fn leg_distances(points: &[Coordinate]) -> Vec<f64> {
        points
            .windows(2)
            .map(|pair| haversine_meters(pair[0], pair[1]))
            .collect()
    }

    /// Total distance and duration along `points` visited in order.
    pub fn path_estimate(&self, points: &[Coordinate]) -> (f64, f64) {
        let meters: f64 = Self::leg_distances(points).iter().sum();
        (meters, self.meters_to_seconds(meters))
    }
}
