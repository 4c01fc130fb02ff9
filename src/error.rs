//! Error types for the fare engine.

/// Failure of an external provider (routing or place search).
///
/// Never reaches the owner as a hard failure: the route estimator falls
/// back to geometry and stop discovery returns an empty list.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Transport failure, including timeouts
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("provider returned status {status}")]
    Status { status: u16 },

    /// Body could not be interpreted
    #[error("malformed provider response: {message}")]
    Malformed { message: String },

    /// Provider answered but found no route
    #[error("no route found (code {code})")]
    NoRoute { code: String },
}

/// Malformed encoded polyline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Input ended in the middle of a value
    #[error("polyline truncated at byte {offset}")]
    Truncated { offset: usize },

    /// Byte outside the polyline alphabet
    #[error("invalid polyline byte {byte:#04x} at offset {offset}")]
    InvalidByte { offset: usize, byte: u8 },

    /// Value does not fit the accumulator
    #[error("polyline value overflows at byte {offset}")]
    Overflow { offset: usize },

    /// Decoded point lies outside latitude ±90 / longitude ±180
    #[error("polyline point ending at byte {offset} is off the globe")]
    OutOfRange { offset: usize },
}

/// Points that cannot be encoded as a polyline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Non-finite or off-globe point
    #[error("point {index} is not a valid coordinate")]
    OutOfRange { index: usize },

    #[error("precision {precision} is too high to encode")]
    Precision { precision: u32 },
}

/// Invalid stop sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StopError {
    #[error("a ride needs at least two stops, got {count}")]
    TooFewStops { count: usize },

    #[error("first stop must be the origin")]
    MissingOrigin,

    #[error("last stop must be the destination")]
    MissingDestination,

    #[error("stop {ordinal} has a role that does not fit its position")]
    MisplacedRole { ordinal: u32 },

    #[error("stop ordinals must be 1-based and dense: expected {expected}, found {found}")]
    NonDenseOrdinals { expected: u32, found: u32 },
}

/// Rejected fare operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FareError {
    /// Proposed price is below the minimum fare
    #[error("price {proposed} is below the minimum fare of {minimum}")]
    InvalidPrice { proposed: f64, minimum: f64 },

    /// Attempt to reach the main fare through a segment edit path
    #[error("invariant violation: {message}")]
    InvariantViolation { message: String },

    #[error("segment {index} out of range for {len} segments")]
    SegmentOutOfRange { index: usize, len: usize },

    #[error("expected {expected} segment fares, got {actual}")]
    SegmentCountMismatch { expected: usize, actual: usize },

    #[error("a fare ledger needs at least one segment")]
    NoSegments,

    #[error("fare values must be finite")]
    NonFiniteFare,

    #[error("segment fares have not been confirmed for this offer")]
    FaresNotConfirmed,

    #[error(transparent)]
    Stops(#[from] StopError),
}
