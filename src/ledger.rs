//! Per-segment fares of one ride offer, with the main fare anchored.
//!
//! The ledger is the only owner of the segment fare array. Segment edits
//! never reach `main_fare`; the only ways to change it are
//! [`SegmentFareLedger::edit_main_fare`] and, for a ride with a single
//! segment, the whole-ride step operations.

use serde::Serialize;

use crate::error::FareError;
use crate::pricing::MIN_FARE;

/// Increment/decrement step, also the lowest fare a segment may hold.
pub const FARE_STEP: f64 = 100.0;

/// Result of a step operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum StepOutcome {
    Applied { fare: f64 },
    /// Already at the floor; nothing changed.
    AtFloor { fare: f64 },
}

impl StepOutcome {
    pub fn fare(&self) -> f64 {
        match *self {
            StepOutcome::Applied { fare } | StepOutcome::AtFloor { fare } => fare,
        }
    }

    pub fn is_at_floor(&self) -> bool {
        matches!(self, StepOutcome::AtFloor { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentFareLedger {
    segments: Vec<f64>,
    main_fare: f64,
}

impl SegmentFareLedger {
    /// Ledger over explicit segment fares, e.g. looked up from a previous
    /// offer or a routing breakdown.
    pub fn new(segments: Vec<f64>, main_fare: f64) -> Result<Self, FareError> {
        if segments.is_empty() {
            return Err(FareError::NoSegments);
        }
        if !main_fare.is_finite() || segments.iter().any(|f| !f.is_finite()) {
            return Err(FareError::NonFiniteFare);
        }
        check_floor(main_fare, MIN_FARE)?;
        for &fare in &segments {
            check_floor(fare, FARE_STEP)?;
        }

        Ok(Self {
            segments,
            main_fare,
        })
    }

    /// Splits `main_fare` across legs in proportion to their distances.
    ///
    /// Each share is rounded to the nearest 10 and floored at one step, so
    /// the shares need not add up to the main fare. Legs of zero total
    /// length are split evenly.
    pub fn proportional(main_fare: f64, leg_distances: &[f64]) -> Result<Self, FareError> {
        if leg_distances.is_empty() {
            return Err(FareError::NoSegments);
        }
        if !main_fare.is_finite() {
            return Err(FareError::NonFiniteFare);
        }
        check_floor(main_fare, MIN_FARE)?;

        if leg_distances.len() == 1 {
            return Self::new(vec![main_fare], main_fare);
        }

        let total: f64 = leg_distances.iter().sum();
        let even = 1.0 / leg_distances.len() as f64;
        let segments = leg_distances
            .iter()
            .map(|&distance| {
                let weight = if total > 0.0 && total.is_finite() {
                    distance.max(0.0) / total
                } else {
                    even
                };
                ((main_fare * weight / 10.0).round() * 10.0).max(FARE_STEP)
            })
            .collect();

        Self::new(segments, main_fare)
    }

    pub fn segments(&self) -> &[f64] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Result<f64, FareError> {
        self.segments
            .get(index)
            .copied()
            .ok_or(FareError::SegmentOutOfRange {
                index,
                len: self.segments.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Anchored origin→destination fare.
    pub fn main_fare(&self) -> f64 {
        self.main_fare
    }

    /// A ride with no intermediate stops.
    pub fn is_whole_ride(&self) -> bool {
        self.segments.len() == 1
    }

    /// Sum of all segments. Informational; not the main fare.
    pub fn total(&self) -> f64 {
        self.segments.iter().sum()
    }

    /// Sum of the segments covering stops `from..to` (0-based stop indices).
    pub fn span_sum(&self, from: usize, to: usize) -> Result<f64, FareError> {
        if to > self.segments.len() {
            return Err(FareError::SegmentOutOfRange {
                index: to.saturating_sub(1),
                len: self.segments.len(),
            });
        }
        Ok(self.segments.get(from..to).map(|s| s.iter().sum()).unwrap_or(0.0))
    }

    pub fn increment_segment(&mut self, index: usize) -> Result<StepOutcome, FareError> {
        let slot = self.slot_mut(index)?;
        *slot += FARE_STEP;
        let fare = *slot;
        tracing::debug!(index, fare, "segment fare incremented");
        Ok(StepOutcome::Applied { fare })
    }

    pub fn decrement_segment(&mut self, index: usize) -> Result<StepOutcome, FareError> {
        let slot = self.slot_mut(index)?;
        let outcome = step_down(slot);
        tracing::debug!(index, ?outcome, "segment fare decremented");
        Ok(outcome)
    }

    /// Sets one segment's fare directly.
    pub fn set_segment(&mut self, index: usize, fare: f64) -> Result<(), FareError> {
        if !fare.is_finite() {
            return Err(FareError::NonFiniteFare);
        }
        check_floor(fare, FARE_STEP)?;
        *self.slot_mut(index)? = fare;
        tracing::debug!(index, fare, "segment fare set");
        Ok(())
    }

    /// Raises the fare of a ride without intermediate stops. The single
    /// segment and the main fare move together.
    pub fn increment_whole_ride_fare(&mut self) -> Result<StepOutcome, FareError> {
        self.ensure_whole_ride("increment")?;
        self.segments[0] += FARE_STEP;
        self.main_fare = self.segments[0];
        tracing::debug!(fare = self.main_fare, "whole ride fare incremented");
        Ok(StepOutcome::Applied {
            fare: self.main_fare,
        })
    }

    pub fn decrement_whole_ride_fare(&mut self) -> Result<StepOutcome, FareError> {
        self.ensure_whole_ride("decrement")?;
        let outcome = step_down(&mut self.segments[0]);
        self.main_fare = self.segments[0];
        tracing::debug!(?outcome, "whole ride fare decremented");
        Ok(outcome)
    }

    /// Explicit owner edit of the main fare. On a whole-ride ledger the
    /// single segment follows.
    pub fn edit_main_fare(&mut self, fare: f64) -> Result<(), FareError> {
        if !fare.is_finite() {
            return Err(FareError::NonFiniteFare);
        }
        check_floor(fare, MIN_FARE)?;
        self.main_fare = fare;
        if self.is_whole_ride() {
            self.segments[0] = fare;
        }
        tracing::info!(fare, "main fare edited");
        Ok(())
    }

    fn ensure_whole_ride(&self, action: &str) -> Result<(), FareError> {
        if self.is_whole_ride() {
            Ok(())
        } else {
            Err(FareError::InvariantViolation {
                message: format!(
                    "whole-ride {action} would change the main fare of a ride with {} segments",
                    self.segments.len()
                ),
            })
        }
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut f64, FareError> {
        let len = self.segments.len();
        self.segments
            .get_mut(index)
            .ok_or(FareError::SegmentOutOfRange { index, len })
    }
}

fn step_down(slot: &mut f64) -> StepOutcome {
    let lowered = (*slot - FARE_STEP).max(FARE_STEP);
    if lowered < *slot {
        *slot = lowered;
        StepOutcome::Applied { fare: lowered }
    } else {
        StepOutcome::AtFloor { fare: *slot }
    }
}

fn check_floor(fare: f64, minimum: f64) -> Result<(), FareError> {
    if fare < minimum {
        Err(FareError::InvalidPrice {
            proposed: fare,
            minimum,
        })
    } else {
        Ok(())
    }
}
