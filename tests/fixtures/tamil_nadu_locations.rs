//! Real towns on the Chennai–Madurai corridor.
//!
//! Coordinates sourced from OpenStreetMap town centres.

#![allow(dead_code)]

use ride_fare_engine::stop::{Coordinate, StopSequence};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

pub const CHENNAI: Location = Location::new("Chennai", 13.0827, 80.2707);
pub const CHENGALPATTU: Location = Location::new("Chengalpattu", 12.6819, 79.9888);
pub const VILLUPURAM: Location = Location::new("Villupuram", 11.9401, 79.4861);
pub const TIRUCHIRAPPALLI: Location = Location::new("Tiruchirappalli", 10.7905, 78.7047);
pub const MADURAI: Location = Location::new("Madurai", 9.9252, 78.1198);

/// Towns between Chennai and Madurai, ordered from Chennai.
pub const CORRIDOR: &[Location] = &[CHENGALPATTU, VILLUPURAM, TIRUCHIRAPPALLI];

/// Stop sequence through the given locations in order.
pub fn stops_through(locations: &[Location]) -> StopSequence {
    StopSequence::from_points(locations.iter().map(|l| (l.name, l.coordinate())))
        .expect("fixture stops are valid")
}

/// Chennai, two corridor towns, Madurai.
pub fn four_stops() -> StopSequence {
    stops_through(&[CHENNAI, VILLUPURAM, TIRUCHIRAPPALLI, MADURAI])
}
