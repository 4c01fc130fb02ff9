//! Overpass HTTP adapter for nearby named places.

use serde::Deserialize;

use crate::error::ProviderError;
use crate::stop::Coordinate;
use crate::traits::{Place, PlaceSearchProvider};

/// Category name for populated places of any size.
pub const LOCALITY: &str = "locality";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaceSearchConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// OSM `place=*` values searched for the locality category.
    pub locality_kinds: Vec<String>,
}

impl Default for PlaceSearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://overpass-api.de/api/interpreter".to_string(),
            timeout_secs: 10,
            locality_kinds: ["city", "town", "village", "suburb"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl PlaceSearchConfig {
    /// Overpass QL for named `place` nodes around `center`.
    pub fn query(&self, center: Coordinate, radius_meters: f64, category: &str) -> String {
        let kinds = if category == LOCALITY {
            self.locality_kinds.join("|")
        } else {
            category.to_string()
        };

        format!(
            "[out:json][timeout:{}];node[\"place\"~\"^({})$\"][\"name\"]\
             (around:{:.0},{:.6},{:.6});out body;",
            self.timeout_secs, kinds, radius_meters, center.latitude, center.longitude
        )
    }
}

#[derive(Debug, Clone)]
pub struct OverpassClient {
    config: PlaceSearchConfig,
    client: reqwest::blocking::Client,
}

impl OverpassClient {
    pub fn new(config: PlaceSearchConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl PlaceSearchProvider for OverpassClient {
    fn search_nearby(
        &self,
        center: Coordinate,
        radius_meters: f64,
        category: &str,
    ) -> Result<Vec<Place>, ProviderError> {
        let query = self.config.query(center, radius_meters, category);
        tracing::debug!(%query, "querying Overpass");

        let response = self
            .client
            .post(&self.config.base_url)
            .form(&[("data", query)])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .json::<OverpassResponse>()
            .map_err(|err| ProviderError::Malformed {
                message: err.to_string(),
            })?;

        Ok(body.into_places())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: OverpassTags,
}

#[derive(Debug, Default, Deserialize)]
struct OverpassTags {
    name: Option<String>,
}

impl OverpassResponse {
    /// Named elements with a position; everything else is skipped.
    pub(crate) fn into_places(self) -> Vec<Place> {
        self.elements
            .into_iter()
            .filter_map(|element| {
                Some(Place {
                    name: element.tags.name.filter(|n| !n.is_empty())?,
                    coordinate: Coordinate::new(element.lat?, element.lon?),
                })
            })
            .collect()
    }
}
