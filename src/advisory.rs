//! Price adjustment policy.
//!
//! [`classify`] decides whether a proposed price is allowed and which
//! advisory, if any, the owner should see. Rendering the advisory is left
//! to the host UI.

use std::fmt;

use serde::Serialize;

use crate::error::FareError;
use crate::pricing::MIN_FARE;

/// Share of the base price beyond which a change is significant.
pub const SIGNIFICANT_DEVIATION: f64 = 0.10;

/// Step applied by [`SeatPriceAdjuster::increment`] and
/// [`SeatPriceAdjuster::decrement`].
pub const SEAT_PRICE_STEP: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisoryKind {
    Info,
    Warning,
    Error,
}

/// Why an advisory was raised.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AdvisoryReason {
    SignificantIncrease { percent: f64 },
    SignificantDecrease { percent: f64 },
    PriceChanged { from: f64, to: f64 },
    InvalidPrice { proposed: f64, minimum: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub text: String,
    #[serde(flatten)]
    pub reason: AdvisoryReason,
}

impl Advisory {
    fn new(kind: AdvisoryKind, reason: AdvisoryReason) -> Self {
        let text = match reason {
            AdvisoryReason::SignificantIncrease { percent } => format!(
                "Increasing the price {percent:.0}% above the suggested fare \
                 may put passengers off"
            ),
            AdvisoryReason::SignificantDecrease { percent } => format!(
                "Decreasing the price {percent:.0}% below the suggested fare \
                 may mean running at a loss"
            ),
            AdvisoryReason::PriceChanged { from, to } => {
                format!("Price changed from {from:.0} to {to:.0}")
            }
            AdvisoryReason::InvalidPrice { minimum, .. } => {
                format!("Price cannot be lower than {minimum:.0}")
            }
        };
        Self { kind, text, reason }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FareError {
    /// Advisory form of a price rejection; other errors have none.
    pub fn advisory(&self) -> Option<Advisory> {
        match *self {
            FareError::InvalidPrice { proposed, minimum } => Some(Advisory::new(
                AdvisoryKind::Error,
                AdvisoryReason::InvalidPrice { proposed, minimum },
            )),
            _ => None,
        }
    }
}

/// Classifies a proposed price against the suggested `base` price and the
/// `original` price at session start.
///
/// Rejects only prices below [`MIN_FARE`]; everything else is allowed,
/// with at most one advisory.
pub fn classify(proposed: f64, base: f64, original: f64) -> Result<Option<Advisory>, FareError> {
    if !proposed.is_finite() {
        return Err(FareError::NonFiniteFare);
    }
    if proposed < MIN_FARE {
        return Err(FareError::InvalidPrice {
            proposed,
            minimum: MIN_FARE,
        });
    }

    let delta = proposed - base;
    if base > 0.0 && delta.abs() > base * SIGNIFICANT_DEVIATION {
        let percent = delta.abs() / base * 100.0;
        let reason = if delta > 0.0 {
            AdvisoryReason::SignificantIncrease { percent }
        } else {
            AdvisoryReason::SignificantDecrease { percent }
        };
        return Ok(Some(Advisory::new(AdvisoryKind::Warning, reason)));
    }

    if proposed != original {
        return Ok(Some(Advisory::new(
            AdvisoryKind::Info,
            AdvisoryReason::PriceChanged {
                from: original,
                to: proposed,
            },
        )));
    }

    Ok(None)
}

/// Per-seat price of a whole-ride offer, adjusted in steps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatPriceAdjuster {
    base: f64,
    original: f64,
    current: f64,
}

impl SeatPriceAdjuster {
    /// `base` is the suggested price, `original` the price the session
    /// started with.
    pub fn new(base: f64, original: f64) -> Self {
        Self {
            base,
            original,
            current: original,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn original(&self) -> f64 {
        self.original
    }

    /// Applies `price` unless it is rejected; the price is left untouched
    /// on error.
    pub fn propose(&mut self, price: f64) -> Result<Option<Advisory>, FareError> {
        let advisory = classify(price, self.base, self.original)?;
        self.current = price;
        Ok(advisory)
    }

    pub fn increment(&mut self) -> Result<Option<Advisory>, FareError> {
        self.propose(self.current + SEAT_PRICE_STEP)
    }

    pub fn decrement(&mut self) -> Result<Option<Advisory>, FareError> {
        self.propose(self.current - SEAT_PRICE_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_minimum_is_rejected() {
        assert_eq!(
            classify(90.0, 200.0, 200.0),
            Err(FareError::InvalidPrice {
                proposed: 90.0,
                minimum: 100.0
            })
        );
    }

    #[test]
    fn test_minimum_itself_is_allowed() {
        let advisory = classify(100.0, 100.0, 100.0).unwrap();
        assert!(advisory.is_none());
    }

    #[test]
    fn test_significant_increase_warns() {
        let advisory = classify(250.0, 200.0, 200.0).unwrap().unwrap();
        assert_eq!(advisory.kind, AdvisoryKind::Warning);
        assert_eq!(advisory.reason, AdvisoryReason::SignificantIncrease { percent: 25.0 });
        assert!(advisory.text.starts_with("Increasing"));
    }

    #[test]
    fn test_significant_decrease_warns_of_loss() {
        let advisory = classify(150.0, 200.0, 200.0).unwrap().unwrap();
        assert_eq!(advisory.kind, AdvisoryKind::Warning);
        assert_eq!(advisory.reason, AdvisoryReason::SignificantDecrease { percent: 25.0 });
        assert!(advisory.text.contains("loss"));
    }

    #[test]
    fn test_exactly_ten_percent_is_not_significant() {
        let advisory = classify(220.0, 200.0, 200.0).unwrap().unwrap();
        assert_eq!(advisory.kind, AdvisoryKind::Info);
        assert_eq!(
            advisory.reason,
            AdvisoryReason::PriceChanged {
                from: 200.0,
                to: 220.0
            }
        );
    }

    #[test]
    fn test_back_to_original_is_silent() {
        assert_eq!(classify(200.0, 200.0, 200.0), Ok(None));
        // Within tolerance of base but equal to a different original
        assert_eq!(classify(190.0, 200.0, 190.0), Ok(None));
    }

    #[test]
    fn test_adjuster_steps_and_rejects_without_mutation() {
        let mut adjuster = SeatPriceAdjuster::new(120.0, 150.0);

        let advisory = adjuster.decrement().unwrap();
        assert_eq!(adjuster.current(), 100.0);
        assert!(matches!(
            advisory.map(|a| a.reason),
            Some(AdvisoryReason::SignificantDecrease { .. })
        ));

        let err = adjuster.decrement().unwrap_err();
        assert!(matches!(err, FareError::InvalidPrice { .. }));
        assert_eq!(adjuster.current(), 100.0);

        adjuster.increment().unwrap();
        assert_eq!(adjuster.current(), 150.0);
    }

    #[test]
    fn test_invalid_price_advisory() {
        let err = classify(40.0, 200.0, 200.0).unwrap_err();
        let advisory = err.advisory().expect("price rejections have an advisory");
        assert_eq!(advisory.kind, AdvisoryKind::Error);
        assert_eq!(advisory.to_string(), "Price cannot be lower than 100");

        assert!(FareError::NoSegments.advisory().is_none());
        assert!(FareError::FaresNotConfirmed.advisory().is_none());
    }

    #[test]
    fn test_advisory_serializes_kind_and_text() {
        let advisory = classify(300.0, 200.0, 200.0).unwrap().unwrap();
        let json = serde_json::to_value(&advisory).unwrap();
        assert_eq!(json["kind"], "WARNING");
        assert_eq!(json["reason"], "significant_increase");
        assert!(json["text"].as_str().unwrap().contains("50%"));
    }
}
