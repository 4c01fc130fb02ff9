//! Stops and coordinates of a ride offer.

use serde::{Deserialize, Serialize};

use crate::error::StopError;

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Builds a coordinate from a (lat, lng) tuple.
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopRole {
    Origin,
    Waypoint,
    Destination,
}

/// A named stop at a position in the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// 1-based position in route order.
    pub id: u32,
    pub role: StopRole,
    pub name: String,
    pub coordinate: Coordinate,
}

impl Stop {
    pub fn new(id: u32, role: StopRole, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id,
            role,
            name: name.into(),
            coordinate,
        }
    }
}

/// Validated stop list: one origin first, one destination last, waypoints
/// between, ordinals 1..=N.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopSequence {
    stops: Vec<Stop>,
}

impl StopSequence {
    pub fn new(stops: Vec<Stop>) -> Result<Self, StopError> {
        let count = stops.len();
        if count < 2 {
            return Err(StopError::TooFewStops { count });
        }

        for (index, stop) in stops.iter().enumerate() {
            let expected = index as u32 + 1;
            if stop.id != expected {
                return Err(StopError::NonDenseOrdinals {
                    expected,
                    found: stop.id,
                });
            }

            let expected_role = if index == 0 {
                StopRole::Origin
            } else if index == count - 1 {
                StopRole::Destination
            } else {
                StopRole::Waypoint
            };

            if stop.role != expected_role {
                return Err(match (index, expected_role) {
                    (0, _) => StopError::MissingOrigin,
                    (_, StopRole::Destination) => StopError::MissingDestination,
                    _ => StopError::MisplacedRole { ordinal: stop.id },
                });
            }
        }

        Ok(Self { stops })
    }

    /// Builds a sequence from named points in route order, assigning
    /// ordinals and roles.
    pub fn from_points<N>(
        points: impl IntoIterator<Item = (N, Coordinate)>,
    ) -> Result<Self, StopError>
    where
        N: Into<String>,
    {
        let points: Vec<(N, Coordinate)> = points.into_iter().collect();
        let last = points.len().saturating_sub(1);
        let stops = points
            .into_iter()
            .enumerate()
            .map(|(index, (name, coordinate))| {
                let role = match index {
                    0 => StopRole::Origin,
                    i if i == last => StopRole::Destination,
                    _ => StopRole::Waypoint,
                };
                Stop::new(index as u32 + 1, role, name, coordinate)
            })
            .collect();

        Self::new(stops)
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Number of legs between consecutive stops.
    pub fn segment_count(&self) -> usize {
        self.stops.len() - 1
    }

    pub fn origin(&self) -> &Stop {
        &self.stops[0]
    }

    pub fn destination(&self) -> &Stop {
        &self.stops[self.stops.len() - 1]
    }

    pub fn waypoints(&self) -> &[Stop] {
        &self.stops[1..self.stops.len() - 1]
    }

    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.stops.iter().map(|stop| stop.coordinate).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: u32, role: StopRole) -> Stop {
        Stop::new(id, role, format!("stop-{id}"), Coordinate::new(0.0, id as f64))
    }

    #[test]
    fn test_accepts_origin_waypoints_destination() {
        let seq = StopSequence::new(vec![
            stop(1, StopRole::Origin),
            stop(2, StopRole::Waypoint),
            stop(3, StopRole::Destination),
        ])
        .unwrap();

        assert_eq!(seq.len(), 3);
        assert_eq!(seq.segment_count(), 2);
        assert_eq!(seq.origin().id, 1);
        assert_eq!(seq.destination().id, 3);
        assert_eq!(seq.waypoints().len(), 1);
    }

    #[test]
    fn test_rejects_single_stop() {
        let err = StopSequence::new(vec![stop(1, StopRole::Origin)]).unwrap_err();
        assert_eq!(err, StopError::TooFewStops { count: 1 });
    }

    #[test]
    fn test_rejects_gap_in_ordinals() {
        let err = StopSequence::new(vec![
            stop(1, StopRole::Origin),
            stop(3, StopRole::Destination),
        ])
        .unwrap_err();
        assert_eq!(err, StopError::NonDenseOrdinals { expected: 2, found: 3 });
    }

    #[test]
    fn test_rejects_misplaced_roles() {
        let err = StopSequence::new(vec![
            stop(1, StopRole::Waypoint),
            stop(2, StopRole::Destination),
        ])
        .unwrap_err();
        assert_eq!(err, StopError::MissingOrigin);

        let err = StopSequence::new(vec![
            stop(1, StopRole::Origin),
            stop(2, StopRole::Waypoint),
        ])
        .unwrap_err();
        assert_eq!(err, StopError::MissingDestination);

        let err = StopSequence::new(vec![
            stop(1, StopRole::Origin),
            stop(2, StopRole::Destination),
            stop(3, StopRole::Destination),
        ])
        .unwrap_err();
        assert_eq!(err, StopError::MisplacedRole { ordinal: 2 });
    }

    #[test]
    fn test_from_points_assigns_roles() {
        let seq = StopSequence::from_points([
            ("A", Coordinate::new(1.0, 1.0)),
            ("B", Coordinate::new(2.0, 2.0)),
            ("C", Coordinate::new(3.0, 3.0)),
            ("D", Coordinate::new(4.0, 4.0)),
        ])
        .unwrap();

        let roles: Vec<StopRole> = seq.stops().iter().map(|s| s.role).collect();
        assert_eq!(
            roles,
            vec![
                StopRole::Origin,
                StopRole::Waypoint,
                StopRole::Waypoint,
                StopRole::Destination
            ]
        );
        assert_eq!(seq.stops()[3].id, 4);
    }
}
