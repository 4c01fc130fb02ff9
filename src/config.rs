//! Engine configuration.
//!
//! Every section has defaults, so hosts only set what they change.

use serde::Deserialize;

use crate::discovery::StopDiscoveryService;
use crate::haversine::HaversineEstimator;
use crate::osrm::{OsrmClient, OsrmConfig};
use crate::places::{OverpassClient, PlaceSearchConfig};
use crate::pricing::FareRates;
use crate::route::RouteEstimator;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub routing: OsrmConfig,
    pub places: PlaceSearchConfig,
    pub rates: FareRates,
    /// Speed assumed by the great-circle fallback.
    pub fallback: HaversineEstimator,
}

impl EngineConfig {
    /// Route estimator backed by OSRM.
    pub fn route_estimator(&self) -> Result<RouteEstimator<OsrmClient>, reqwest::Error> {
        let client = OsrmClient::new(self.routing.clone())?;
        Ok(RouteEstimator::with_fallback(client, self.fallback))
    }

    /// Stop discovery backed by Overpass.
    pub fn stop_discovery(&self) -> Result<StopDiscoveryService<OverpassClient>, reqwest::Error> {
        Ok(StopDiscoveryService::new(OverpassClient::new(self.places.clone())?))
    }
}
