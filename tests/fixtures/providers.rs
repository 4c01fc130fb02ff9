//! Hand-written provider doubles.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use ride_fare_engine::error::ProviderError;
use ride_fare_engine::stop::Coordinate;
use ride_fare_engine::traits::{Place, PlaceSearchProvider, ProviderRoute, RoutingProvider};

/// Routing provider that is always down.
pub struct UnavailableRouting {
    pub calls: AtomicUsize,
}

impl UnavailableRouting {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RoutingProvider for UnavailableRouting {
    fn route(
        &self,
        _: Coordinate,
        _: Coordinate,
        _: &[Coordinate],
    ) -> Result<ProviderRoute, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::Malformed {
            message: "connection reset".to_string(),
        })
    }
}

/// Routing provider answering with a fixed road route.
pub struct FixedRouting {
    pub route: ProviderRoute,
}

impl RoutingProvider for FixedRouting {
    fn route(
        &self,
        _: Coordinate,
        _: Coordinate,
        _: &[Coordinate],
    ) -> Result<ProviderRoute, ProviderError> {
        Ok(self.route.clone())
    }
}

/// Place search returning a fixed list regardless of the query.
pub struct FixedPlaces {
    pub places: Vec<Place>,
}

impl PlaceSearchProvider for FixedPlaces {
    fn search_nearby(&self, _: Coordinate, _: f64, _: &str) -> Result<Vec<Place>, ProviderError> {
        Ok(self.places.clone())
    }
}
