//! Suggested base fare from a route estimate.

use serde::{Deserialize, Serialize};

use crate::route::RouteEstimate;

/// Lowest fare any ride, segment or seat may be priced at.
pub const MIN_FARE: f64 = 100.0;

/// Pricing constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FareRates {
    pub base_fare: f64,
    pub per_km: f64,
    pub per_minute: f64,
    pub per_stop: f64,
    pub min_fare: f64,
    /// Totals are rounded to the nearest multiple of this.
    pub rounding_unit: f64,
}

impl Default for FareRates {
    fn default() -> Self {
        Self {
            base_fare: 50.0,
            per_km: 6.0,
            per_minute: 2.0,
            per_stop: 20.0,
            min_fare: MIN_FARE,
            rounding_unit: 10.0,
        }
    }
}

/// Itemized fare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingBreakdown {
    pub base_fare: f64,
    pub distance_fare: f64,
    pub time_fare: f64,
    pub stop_surcharge: f64,
    pub total: f64,
}

impl PricingBreakdown {
    /// Sum of the components before flooring and rounding.
    pub fn raw_sum(&self) -> f64 {
        self.base_fare + self.distance_fare + self.time_fare + self.stop_surcharge
    }
}

/// Rounds to the nearest `unit`, then floors at `min_fare`.
pub fn round_fare(raw: f64, rates: &FareRates) -> f64 {
    let rounded = (raw / rates.rounding_unit).round() * rates.rounding_unit;
    rounded.max(rates.min_fare)
}

/// Prices a route with the default rates.
///
/// `stop_count` is the number of intermediate stops the ride makes.
pub fn price(route: &RouteEstimate, stop_count: usize) -> PricingBreakdown {
    price_with(route, stop_count, &FareRates::default())
}

pub fn price_with(route: &RouteEstimate, stop_count: usize, rates: &FareRates) -> PricingBreakdown {
    let mut breakdown = PricingBreakdown {
        base_fare: rates.base_fare,
        distance_fare: route.distance_meters / 1000.0 * rates.per_km,
        time_fare: route.duration_seconds / 60.0 * rates.per_minute,
        stop_surcharge: stop_count as f64 * rates.per_stop,
        total: 0.0,
    };
    breakdown.total = round_fare(breakdown.raw_sum(), rates);
    breakdown
}
