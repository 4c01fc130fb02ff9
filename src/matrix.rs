//! Fare for every (boarding, drop) stop pair.

use serde::Serialize;

use crate::error::FareError;
use crate::ledger::SegmentFareLedger;
use crate::stop::{StopRole, StopSequence};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FareCombination {
    pub from_ordinal: u32,
    pub to_ordinal: u32,
    pub fare: f64,
}

/// All fare combinations of an offer, in (from, to) order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FareMatrix {
    combinations: Vec<FareCombination>,
}

impl FareMatrix {
    pub fn combinations(&self) -> &[FareCombination] {
        &self.combinations
    }

    pub fn into_combinations(self) -> Vec<FareCombination> {
        self.combinations
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Fare a passenger boarding at `from` and dropping at `to` pays.
    pub fn fare_between(&self, from_ordinal: u32, to_ordinal: u32) -> Option<f64> {
        self.combinations
            .iter()
            .find(|c| c.from_ordinal == from_ordinal && c.to_ordinal == to_ordinal)
            .map(|c| c.fare)
    }
}

/// Builds the matrix: contiguous segment sums, except the origin→destination
/// pair which always carries the ledger's main fare.
pub fn build(stops: &StopSequence, ledger: &SegmentFareLedger) -> Result<FareMatrix, FareError> {
    let expected = stops.segment_count();
    if ledger.len() != expected {
        return Err(FareError::SegmentCountMismatch {
            expected,
            actual: ledger.len(),
        });
    }

    let stops = stops.stops();
    let segments = ledger.segments();
    let mut combinations = Vec::with_capacity(stops.len() * (stops.len() - 1) / 2);

    for (i, from) in stops.iter().enumerate() {
        let mut fare = 0.0;
        for (j, to) in stops.iter().enumerate().skip(i + 1) {
            fare += segments[j - 1];
            let anchored = from.role == StopRole::Origin && to.role == StopRole::Destination;
            combinations.push(FareCombination {
                from_ordinal: from.id,
                to_ordinal: to.id,
                fare: if anchored { ledger.main_fare() } else { fare },
            });
        }
    }

    Ok(FareMatrix { combinations })
}
