//! Planar segment and circle helpers shared by the oracles.

use tactics_core::Position;

/// Distance along `from -> to` at which the segment enters the circle.
///
/// Returns `Some(0.0)` when `from` already lies inside the circle and `None`
/// when the segment misses it. Only the ground plane (x, z) is considered.
pub(crate) fn segment_circle_entry(
    from: Position,
    to: Position,
    center: Position,
    radius: f32,
) -> Option<f32> {
    let (fx, fz) = (from.x - center.x, from.z - center.z);
    let c = fx * fx + fz * fz - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    let (dx, dz) = (to.x - from.x, to.z - from.z);
    let a = dx * dx + dz * dz;
    if a == 0.0 {
        return None;
    }

    let b = 2.0 * (fx * dx + fz * dz);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&t).then(|| t * a.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_distance_on_a_straight_line() {
        let hit = segment_circle_entry(
            Position::planar(0.0, 0.0),
            Position::planar(10.0, 0.0),
            Position::planar(5.0, 0.0),
            1.0,
        );
        assert_eq!(hit, Some(4.0));
    }

    #[test]
    fn misses_and_short_segments() {
        let center = Position::planar(5.0, 3.0);
        assert_eq!(
            segment_circle_entry(Position::ORIGIN, Position::planar(10.0, 0.0), center, 1.0),
            None
        );
        // Segment stops before reaching the circle.
        assert_eq!(
            segment_circle_entry(
                Position::ORIGIN,
                Position::planar(2.0, 0.0),
                Position::planar(5.0, 0.0),
                1.0
            ),
            None
        );
    }

    #[test]
    fn starting_inside_counts_as_immediate() {
        assert_eq!(
            segment_circle_entry(
                Position::planar(0.5, 0.0),
                Position::planar(10.0, 0.0),
                Position::ORIGIN,
                1.0
            ),
            Some(0.0)
        );
    }
}
