//! Seams to the external routing and place-search providers.
//!
//! The engine only depends on these traits; HTTP adapters live in
//! [`crate::osrm`] and [`crate::places`], and tests supply their own.

use crate::error::ProviderError;
use crate::stop::Coordinate;

/// Raw answer of a routing provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRoute {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// Encoded path, if the provider returned one.
    pub encoded_path: Option<String>,
    /// Fixed-point precision of `encoded_path` (5 for polyline, 6 for polyline6).
    pub path_precision: u32,
}

/// Computes a road route through origin, waypoints and destination in order.
pub trait RoutingProvider {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        waypoints: &[Coordinate],
    ) -> Result<ProviderRoute, ProviderError>;
}

/// A named place returned by a place search.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub coordinate: Coordinate,
}

/// Finds named places of a category within a radius.
pub trait PlaceSearchProvider {
    fn search_nearby(
        &self,
        center: Coordinate,
        radius_meters: f64,
        category: &str,
    ) -> Result<Vec<Place>, ProviderError>;
}

impl<T: RoutingProvider + ?Sized> RoutingProvider for &T {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        waypoints: &[Coordinate],
    ) -> Result<ProviderRoute, ProviderError> {
        (**self).route(origin, destination, waypoints)
    }
}

impl<T: PlaceSearchProvider + ?Sized> PlaceSearchProvider for &T {
    fn search_nearby(
        &self,
        center: Coordinate,
        radius_meters: f64,
        category: &str,
    ) -> Result<Vec<Place>, ProviderError> {
        (**self).search_nearby(center, radius_meters, category)
    }
}
