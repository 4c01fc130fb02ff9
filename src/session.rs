//! One owner's in-progress ride offer.
//!
//! Ties the pieces together in workflow order: stops, route estimate,
//! suggested fare, segment ledger, published fare matrix. A session is
//! owned by a single caller and is not meant to be shared across threads.

use crate::error::FareError;
use crate::haversine::HaversineEstimator;
use crate::ledger::SegmentFareLedger;
use crate::matrix::{self, FareMatrix};
use crate::pricing::{self, FareRates, PricingBreakdown};
use crate::route::{RouteEstimate, RouteRequest, RouteSource};
use crate::stop::StopSequence;

/// Sequence number of a route request. Later tickets win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteTicket(u64);

impl RouteTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct OfferSession {
    stops: StopSequence,
    rates: FareRates,
    fallback: HaversineEstimator,
    last_issued: u64,
    /// Tickets at or below this were issued for a previous stop list.
    stops_epoch: u64,
    route: Option<(RouteTicket, RouteEstimate)>,
    ledger: Option<SegmentFareLedger>,
}

impl OfferSession {
    pub fn new(stops: StopSequence, rates: FareRates) -> Self {
        Self {
            stops,
            rates,
            fallback: HaversineEstimator::default(),
            last_issued: 0,
            stops_epoch: 0,
            route: None,
            ledger: None,
        }
    }

    pub fn stops(&self) -> &StopSequence {
        &self.stops
    }

    /// Replaces the stop list. The current route and ledger no longer apply
    /// and are dropped, and outstanding route requests become stale.
    pub fn set_stops(&mut self, stops: StopSequence) {
        self.stops = stops;
        self.stops_epoch = self.last_issued;
        self.route = None;
        self.ledger = None;
    }

    /// Issues a ticket and the request to send to the route estimator.
    pub fn request_route(&mut self) -> (RouteTicket, RouteRequest) {
        self.last_issued += 1;
        let ticket = RouteTicket(self.last_issued);
        let request = RouteRequest::new(
            self.stops.origin().coordinate,
            self.stops.destination().coordinate,
            self.stops.waypoints().iter().map(|s| s.coordinate).collect(),
        );
        (ticket, request)
    }

    /// Stores the estimate unless a newer one is already in place or the
    /// stops changed since the ticket was issued. Returns whether it was
    /// kept.
    pub fn accept_route(&mut self, ticket: RouteTicket, estimate: RouteEstimate) -> bool {
        if ticket.0 <= self.stops_epoch {
            tracing::debug!(ticket = ticket.0, "discarding route for replaced stops");
            return false;
        }
        if let Some((current, _)) = &self.route {
            if *current >= ticket {
                tracing::debug!(ticket = ticket.0, current = current.0, "discarding stale route");
                return false;
            }
        }
        self.route = Some((ticket, estimate));
        true
    }

    pub fn route(&self) -> Option<&RouteEstimate> {
        self.route.as_ref().map(|(_, estimate)| estimate)
    }

    /// Suggested fare for the current route, or for a great-circle estimate
    /// of the stops when no route has arrived yet.
    pub fn suggested_fare(&self) -> PricingBreakdown {
        let stop_count = self.stops.waypoints().len();
        match self.route() {
            Some(route) => pricing::price_with(route, stop_count, &self.rates),
            None => {
                let (distance_meters, duration_seconds) =
                    self.fallback.path_estimate(&self.stops.coordinates());
                let estimate = RouteEstimate {
                    distance_meters,
                    duration_seconds,
                    source: RouteSource::Fallback,
                };
                pricing::price_with(&estimate, stop_count, &self.rates)
            }
        }
    }

    /// Starts the ledger by splitting the main fare across legs by
    /// distance. `main_fare` overrides the suggested total.
    pub fn confirm_fares(
        &mut self,
        main_fare: Option<f64>,
    ) -> Result<&mut SegmentFareLedger, FareError> {
        let main_fare = main_fare.unwrap_or_else(|| self.suggested_fare().total);
        let legs = HaversineEstimator::leg_distances(&self.stops.coordinates());
        let ledger = SegmentFareLedger::proportional(main_fare, &legs)?;
        Ok(self.ledger.insert(ledger))
    }

    /// Starts the ledger from explicit per-segment fares.
    pub fn confirm_segment_fares(
        &mut self,
        segments: Vec<f64>,
        main_fare: f64,
    ) -> Result<&mut SegmentFareLedger, FareError> {
        let expected = self.stops.segment_count();
        if segments.len() != expected {
            return Err(FareError::SegmentCountMismatch {
                expected,
                actual: segments.len(),
            });
        }
        let ledger = SegmentFareLedger::new(segments, main_fare)?;
        Ok(self.ledger.insert(ledger))
    }

    pub fn ledger(&self) -> Option<&SegmentFareLedger> {
        self.ledger.as_ref()
    }

    pub fn ledger_mut(&mut self) -> Option<&mut SegmentFareLedger> {
        self.ledger.as_mut()
    }

    /// Fare matrix for the publish payload.
    pub fn publish(&self) -> Result<FareMatrix, FareError> {
        let ledger = self.ledger.as_ref().ok_or(FareError::FaresNotConfirmed)?;
        let matrix = matrix::build(&self.stops, ledger)?;
        tracing::info!(
            stops = self.stops.len(),
            combinations = matrix.len(),
            main_fare = ledger.main_fare(),
            "fare matrix published"
        );
        Ok(matrix)
    }
}
