//! Flee point selection.

use core::f32::consts::TAU;

use crate::env::NavigationOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// A valid sample on the flee circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FleeCandidate {
    /// Sample index; the angle is `index * 2π / sample_count`.
    pub index: u32,
    pub point: Position,
    /// Planar distance from the threat.
    pub distance: f32,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FleeError {
    #[error("no valid flee point among {samples} samples")]
    NoValidFleePoint { samples: u32 },
}

impl GameError for FleeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            FleeError::NoValidFleePoint { .. } => "FLEE_NO_VALID_POINT",
        }
    }
}

/// Slack allowed when comparing a flee point against the movement range.
const REACH_EPSILON: f32 = 1e-3;

/// Picks the point farthest from `threat` that a unit at `origin` can reach.
///
/// `sample_count` points are spaced evenly on a circle of radius
/// `movement_range` around the threat. Each is snapped to valid ground via
/// [`NavigationOracle::sample_nearest_valid`] and dropped when it lies more
/// than `movement_range` from `origin`. The farthest remaining point wins and
/// ties keep the lowest index.
///
/// # Errors
///
/// `FleeError::NoValidFleePoint` when no sample validates within reach,
/// including when `sample_count` is zero.
pub fn find_flee_point(
    origin: Position,
    threat: Position,
    movement_range: f32,
    sample_count: u32,
    snap_radius: f32,
    nav: &(impl NavigationOracle + ?Sized),
) -> Result<FleeCandidate, FleeError> {
    let mut best: Option<FleeCandidate> = None;

    for index in 0..sample_count {
        let angle = index as f32 * TAU / sample_count as f32;
        let sample = threat.offset(
            angle.cos() * movement_range,
            angle.sin() * movement_range,
        );

        let Some(point) = nav.sample_nearest_valid(sample, snap_radius) else {
            continue;
        };
        if origin.distance(point) > movement_range + REACH_EPSILON {
            continue;
        }

        let distance = threat.distance(point);
        if best.is_none_or(|current| distance > current.distance) {
            best = Some(FleeCandidate {
                index,
                point,
                distance,
            });
        }
    }

    best.ok_or(FleeError::NoValidFleePoint {
        samples: sample_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::testing::{Blocked, OpenField};

    /// Only the half-plane `x <= limit` is walkable; points beyond snap back
    /// onto the boundary when within the snap radius.
    struct Wall {
        limit: f32,
    }

    impl NavigationOracle for Wall {
        fn calculate_path(&self, from: Position, to: Position) -> Option<Vec<Position>> {
            Some(vec![from, to])
        }

        fn sample_nearest_valid(&self, point: Position, snap_radius: f32) -> Option<Position> {
            if point.x <= self.limit {
                Some(point)
            } else if point.x - self.limit <= snap_radius {
                Some(Position::new(self.limit, point.y, point.z))
            } else {
                None
            }
        }
    }

    #[test]
    fn no_valid_sample_is_an_error_not_origin() {
        let result = find_flee_point(Position::ORIGIN, Position::planar(3.0, 3.0), 10.0, 36, 1.0, &Blocked);
        assert_eq!(result, Err(FleeError::NoValidFleePoint { samples: 36 }));
    }

    #[test]
    fn zero_samples_is_an_error() {
        assert!(find_flee_point(Position::planar(4.0, 0.0), Position::ORIGIN, 10.0, 0, 1.0, &OpenField).is_err());
    }

    /// Snaps every sample onto one of two points equidistant from the origin.
    struct TwoPads;

    impl NavigationOracle for TwoPads {
        fn calculate_path(&self, from: Position, to: Position) -> Option<Vec<Position>> {
            Some(vec![from, to])
        }

        fn sample_nearest_valid(&self, point: Position, _snap_radius: f32) -> Option<Position> {
            if point.x < 0.0 {
                Some(Position::planar(-5.0, 0.0))
            } else {
                Some(Position::planar(5.0, 0.0))
            }
        }
    }

    #[test]
    fn equidistant_samples_resolve_to_first_index() {
        let best = find_flee_point(Position::ORIGIN, Position::ORIGIN, 10.0, 8, 1.0, &TwoPads).unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.point, Position::planar(5.0, 0.0));
        assert_eq!(best.distance, 5.0);
    }

    #[test]
    fn open_field_result_lies_on_the_circle() {
        let threat = Position::planar(2.0, -1.0);
        let best = find_flee_point(threat, threat, 6.0, 36, 1.0, &OpenField).unwrap();
        assert!((best.distance - 6.0).abs() < 1e-3);
    }

    #[test]
    fn picks_farthest_valid_sample() {
        let nav = Wall { limit: 0.0 };
        let threat = Position::ORIGIN;
        let best = find_flee_point(Position::planar(-3.0, 0.0), threat, 10.0, 36, 0.5, &nav).unwrap();

        let mut closest_valid = f32::INFINITY;
        for index in 0..36u32 {
            let angle = index as f32 * TAU / 36.0;
            let sample = threat.offset(angle.cos() * 10.0, angle.sin() * 10.0);
            if let Some(point) = nav.sample_nearest_valid(sample, 0.5) {
                closest_valid = closest_valid.min(threat.distance(point));
            }
        }
        assert!(best.distance >= closest_valid);
        assert!(best.point.x <= 0.0);
        assert!((best.distance - 10.0).abs() < 1e-3);
    }

    #[test]
    fn skips_samples_beyond_reach_of_the_fleeing_unit() {
        let origin = Position::planar(-3.0, 0.0);
        let best = find_flee_point(origin, Position::ORIGIN, 10.0, 36, 1.0, &OpenField).unwrap();
        assert!(best.point.x < 0.0);
        assert!(origin.distance(best.point) <= 10.0 + REACH_EPSILON);
        assert!((best.distance - 10.0).abs() < 1e-3);
    }

    #[test]
    fn every_sample_out_of_reach_is_an_error() {
        let origin = Position::planar(-40.0, 0.0);
        let result = find_flee_point(origin, Position::ORIGIN, 10.0, 36, 1.0, &OpenField);
        assert_eq!(result, Err(FleeError::NoValidFleePoint { samples: 36 }));
    }
}
