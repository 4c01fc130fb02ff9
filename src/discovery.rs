//! Candidate intermediate stops between two endpoints.
//!
//! Best-effort: a failed place search yields no candidates.

use serde::Serialize;

use crate::haversine::haversine_meters;
use crate::places::LOCALITY;
use crate::stop::Coordinate;
use crate::traits::PlaceSearchProvider;

/// Share of the origin→destination distance used as search radius.
const RADIUS_SHARE: f64 = 0.4;

/// Largest radius the place-search provider accepts.
pub const MAX_RADIUS_M: f64 = 50_000.0;

pub const MAX_CANDIDATES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateStop {
    pub name: String,
    pub coordinate: Coordinate,
    pub distance_from_origin: f64,
}

/// Plain average of the endpoints; good enough to center a search.
pub fn midpoint(a: Coordinate, b: Coordinate) -> Coordinate {
    Coordinate::new(
        (a.latitude + b.latitude) / 2.0,
        (a.longitude + b.longitude) / 2.0,
    )
}

/// Search radius for a route of `distance_meters`.
pub fn search_radius(distance_meters: f64) -> f64 {
    (distance_meters * RADIUS_SHARE).min(MAX_RADIUS_M)
}

#[derive(Debug, Clone)]
pub struct StopDiscoveryService<P> {
    provider: P,
}

impl<P: PlaceSearchProvider> StopDiscoveryService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Up to ten named localities near the route midpoint, nearest to the
    /// origin first.
    pub fn find_intermediate_stops(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Vec<CandidateStop> {
        let center = midpoint(origin, destination);
        let radius = search_radius(haversine_meters(origin, destination));

        let places = match self.provider.search_nearby(center, radius, LOCALITY) {
            Ok(places) => places,
            Err(err) => {
                tracing::warn!(%err, "place search failed, no stop suggestions");
                return Vec::new();
            }
        };

        let mut candidates: Vec<CandidateStop> = places
            .into_iter()
            .map(|place| CandidateStop {
                distance_from_origin: haversine_meters(origin, place.coordinate),
                name: place.name,
                coordinate: place.coordinate,
            })
            .collect();

        candidates.sort_by(|a, b| a.distance_from_origin.total_cmp(&b.distance_from_origin));
        candidates.truncate(MAX_CANDIDATES);
        tracing::debug!(count = candidates.len(), radius, "stop candidates found");
        candidates
    }
}
