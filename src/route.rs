//! Route estimation with a deterministic geometric fallback.
//!
//! A provider failure of any kind (transport, status, body, timeout) is
//! absorbed here: the caller always gets a usable [`RouteEstimate`].

use rayon::prelude::*;
use serde::Serialize;

use crate::error::ProviderError;
use crate::haversine::HaversineEstimator;
use crate::polyline::{self, Polyline};
use crate::stop::Coordinate;
use crate::traits::{ProviderRoute, RoutingProvider};

/// Where an estimate came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteSource {
    /// Road route from the routing provider; `path` is absent when the
    /// provider sent no geometry.
    Provider { path: Option<Polyline> },
    /// Great-circle legs at an assumed average speed; no path.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEstimate {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    #[serde(flatten)]
    pub source: RouteSource,
}

impl RouteEstimate {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, RouteSource::Fallback)
    }

    pub fn path(&self) -> Option<&Polyline> {
        match &self.source {
            RouteSource::Provider { path } => path.as_ref(),
            RouteSource::Fallback => None,
        }
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }
}

/// Origin, destination and ordered waypoints of one route computation.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub waypoints: Vec<Coordinate>,
}

impl RouteRequest {
    pub fn new(origin: Coordinate, destination: Coordinate, waypoints: Vec<Coordinate>) -> Self {
        Self {
            origin,
            destination,
            waypoints,
        }
    }

    /// All points in visiting order.
    pub fn points(&self) -> Vec<Coordinate> {
        let mut points = Vec::with_capacity(self.waypoints.len() + 2);
        points.push(self.origin);
        points.extend_from_slice(&self.waypoints);
        points.push(self.destination);
        points
    }
}

#[derive(Debug, Clone)]
pub struct RouteEstimator<P> {
    provider: P,
    fallback: HaversineEstimator,
}

impl<P: RoutingProvider> RouteEstimator<P> {
    pub fn new(provider: P) -> Self {
        Self::with_fallback(provider, HaversineEstimator::default())
    }

    pub fn with_fallback(provider: P, fallback: HaversineEstimator) -> Self {
        Self { provider, fallback }
    }

    pub fn compute_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        waypoints: &[Coordinate],
    ) -> RouteEstimate {
        let provided = self
            .provider
            .route(origin, destination, waypoints)
            .and_then(validate);

        match provided {
            Ok(route) => from_provider(route),
            Err(err) => {
                tracing::warn!(%err, "routing provider unavailable, using great-circle fallback");
                let mut points = Vec::with_capacity(waypoints.len() + 2);
                points.push(origin);
                points.extend_from_slice(waypoints);
                points.push(destination);
                self.fallback_estimate(&points)
            }
        }
    }

    pub fn compute(&self, request: &RouteRequest) -> RouteEstimate {
        self.compute_route(request.origin, request.destination, &request.waypoints)
    }

    /// Estimates independent requests in parallel, preserving order.
    pub fn compute_routes(&self, requests: &[RouteRequest]) -> Vec<RouteEstimate>
    where
        P: Sync,
    {
        requests.par_iter().map(|request| self.compute(request)).collect()
    }

    /// Geometry-only estimate along `points` in order.
    pub fn fallback_estimate(&self, points: &[Coordinate]) -> RouteEstimate {
        let (distance_meters, duration_seconds) = self.fallback.path_estimate(points);
        RouteEstimate {
            distance_meters,
            duration_seconds,
            source: RouteSource::Fallback,
        }
    }
}

fn validate(route: ProviderRoute) -> Result<ProviderRoute, ProviderError> {
    let usable = |v: f64| v.is_finite() && v >= 0.0;
    if usable(route.distance_meters) && usable(route.duration_seconds) {
        Ok(route)
    } else {
        Err(ProviderError::Malformed {
            message: format!(
                "distance {} / duration {} out of range",
                route.distance_meters, route.duration_seconds
            ),
        })
    }
}

fn from_provider(route: ProviderRoute) -> RouteEstimate {
    let path = route
        .encoded_path
        .as_deref()
        .map(|encoded| {
            Polyline::new(polyline::decode_with_precision(encoded, route.path_precision))
        });

    RouteEstimate {
        distance_meters: route.distance_meters,
        duration_seconds: route.duration_seconds,
        source: RouteSource::Provider { path },
    }
}
