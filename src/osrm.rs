//! OSRM HTTP adapter for route estimates.

use serde::Deserialize;

use crate::error::ProviderError;
use crate::stop::Coordinate;
use crate::traits::{ProviderRoute, RoutingProvider};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
    /// Request `polyline6` geometries instead of `polyline`.
    pub high_precision: bool,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
            high_precision: false,
        }
    }
}

impl OsrmConfig {
    fn geometries(&self) -> &'static str {
        if self.high_precision { "polyline6" } else { "polyline" }
    }

    fn precision(&self) -> u32 {
        if self.high_precision { 6 } else { 5 }
    }

    /// `/route/v1` URL for the stops in visiting order.
    pub fn route_url(&self, stops: &[Coordinate]) -> String {
        let coords = stops
            .iter()
            .map(|c| format!("{:.6},{:.6}", c.longitude, c.latitude))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}?overview=full&geometries={}",
            self.base_url.trim_end_matches('/'),
            self.profile,
            coords,
            self.geometries()
        )
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }
}

impl RoutingProvider for OsrmClient {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        waypoints: &[Coordinate],
    ) -> Result<ProviderRoute, ProviderError> {
        let mut stops = Vec::with_capacity(waypoints.len() + 2);
        stops.push(origin);
        stops.extend_from_slice(waypoints);
        stops.push(destination);

        let url = self.config.route_url(&stops);
        tracing::debug!(%url, "requesting OSRM route");

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .json::<OsrmRouteResponse>()
            .map_err(|err| ProviderError::Malformed {
                message: err.to_string(),
            })?;

        body.into_route(self.config.precision())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: Option<String>,
}

impl OsrmRouteResponse {
    pub(crate) fn into_route(self, precision: u32) -> Result<ProviderRoute, ProviderError> {
        if self.code != "Ok" {
            return Err(ProviderError::NoRoute { code: self.code });
        }

        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NoRoute {
                code: "NoRoutes".to_string(),
            })?;

        Ok(ProviderRoute {
            distance_meters: route.distance,
            duration_seconds: route.duration,
            encoded_path: route.geometry.filter(|g| !g.is_empty()),
            path_precision: precision,
        })
    }
}
