use crate::state::Position;

/// Walkability and path queries supplied by the host environment.
///
/// The rules never pathfind themselves; they only ask whether a move is
/// possible and where the nearest walkable point to a sample lies.
pub trait NavigationOracle: Send + Sync {
    /// Ordered waypoints from `from` to `to`, inclusive of both ends.
    ///
    /// Returns `None` when no valid path exists.
    fn calculate_path(&self, from: Position, to: Position) -> Option<Vec<Position>>;

    /// Nearest walkable point within `snap_radius` of `point`.
    fn sample_nearest_valid(&self, point: Position, snap_radius: f32) -> Option<Position>;

    /// Planar length of the path to `to`, or `None` if unreachable.
    fn path_length(&self, from: Position, to: Position) -> Option<f32> {
        let path = self.calculate_path(from, to)?;
        Some(
            path.windows(2)
                .map(|pair| pair[0].distance(pair[1]))
                .sum(),
        )
    }
}
