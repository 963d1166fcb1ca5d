use crate::state::Position;

/// Line-of-sight queries supplied by the host environment.
pub trait OcclusionOracle: Send + Sync {
    /// Planar distance from `from` to the first blocking object on the
    /// segment `from -> to`, or `None` if the segment is clear.
    fn first_obstruction(&self, from: Position, to: Position) -> Option<f32>;

    /// Whether `to` is the first thing a cast from `from` reaches.
    fn has_line_of_sight(&self, from: Position, to: Position) -> bool {
        match self.first_obstruction(from, to) {
            Some(distance) => distance >= from.distance(to),
            None => true,
        }
    }
}
